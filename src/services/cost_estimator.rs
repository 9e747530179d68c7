// Cost Estimation Service
// Projects spend from the result count and per-email rates

use crate::models::RateConfig;

/// Estimate the cost of `count` classified emails at the given rates,
/// formatted with exactly four fractional digits.
///
/// Rates are assumed sanitized ([`RateConfig`] enforces finite,
/// non-negative values on every construction path), so this never panics
/// and is monotonic in both the count and each rate.
pub fn estimate_cost(count: usize, rates: &RateConfig) -> String {
    format!("{:.4}", count as f64 * rates.per_email())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_results_is_zero_cost() {
        assert_eq!(estimate_cost(0, &RateConfig::default()), "0.0000");
        assert_eq!(estimate_cost(0, &RateConfig::new(9.5, 3.25)), "0.0000");
    }

    #[test]
    fn test_default_rates() {
        // 4 × (0.001 + 0.002)
        assert_eq!(estimate_cost(4, &RateConfig::default()), "0.0120");
    }

    #[test]
    fn test_four_fractional_digits() {
        assert_eq!(estimate_cost(1, &RateConfig::new(1.0, 0.5)), "1.5000");
        assert_eq!(estimate_cost(3, &RateConfig::new(0.00001, 0.0)), "0.0000");
    }

    #[test]
    fn test_monotonic_in_count() {
        let rates = RateConfig::default();
        let mut prev = estimate_cost(0, &rates).parse::<f64>().unwrap();
        for n in 1..20 {
            let cur = estimate_cost(n, &rates).parse::<f64>().unwrap();
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn test_monotonic_in_rates() {
        for (r1, r2) in [(0.0, 0.001), (0.001, 0.002), (0.5, 2.0)] {
            let low = estimate_cost(5, &RateConfig::new(r1, 0.002));
            let high = estimate_cost(5, &RateConfig::new(r2, 0.002));
            assert!(low.parse::<f64>().unwrap() <= high.parse::<f64>().unwrap());

            let low = estimate_cost(5, &RateConfig::new(0.001, r1));
            let high = estimate_cost(5, &RateConfig::new(0.001, r2));
            assert!(low.parse::<f64>().unwrap() <= high.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn test_sanitized_garbage_rates_do_not_panic() {
        let rates = RateConfig::new(f64::NAN, -3.0);
        assert_eq!(estimate_cost(10, &rates), "0.0000");
    }
}
