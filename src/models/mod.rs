// mail-triage Data Models
// Wire types for the classification service plus operator-tunable rates

use serde::{Deserialize, Serialize};

// ============ Classification Wire Types ============

/// Request body for one classify call. Field name matches the wire
/// contract exactly: `{"email": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest {
    pub email: String,
}

/// One classified email as returned by the service.
///
/// `category` is an open label set — "Support", "Sales" and "Feedback" are
/// the ones the service is known to emit today, but new labels must flow
/// through untouched (see [`category_style`] for rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub email: String,
    pub category: String,
    pub auto_response: String,
}

/// Error body the service may attach to non-2xx responses.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

// ============ Rate Configuration ============

/// Per-email billing rates, operator-editable.
///
/// Values are sanitized on every construction path: anything non-finite or
/// negative coerces to 0.0, so downstream cost math never sees NaN or a
/// negative rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    #[serde(default = "default_classify_rate")]
    pub classify_per_email: f64,
    #[serde(default = "default_generate_rate")]
    pub generate_per_email: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            classify_per_email: default_classify_rate(),
            generate_per_email: default_generate_rate(),
        }
    }
}

impl RateConfig {
    pub fn new(classify_per_email: f64, generate_per_email: f64) -> Self {
        Self {
            classify_per_email: sanitize_rate(classify_per_email),
            generate_per_email: sanitize_rate(generate_per_email),
        }
    }

    /// Re-apply the non-negative/finite invariant, e.g. after deserializing
    /// a hand-edited config file.
    pub fn sanitized(self) -> Self {
        Self::new(self.classify_per_email, self.generate_per_email)
    }

    /// Combined cost of classifying one email and generating its response.
    pub fn per_email(&self) -> f64 {
        self.classify_per_email + self.generate_per_email
    }
}

/// Coerce an arbitrary float to a usable rate: finite and non-negative,
/// otherwise 0.0.
pub fn sanitize_rate(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse an operator-supplied rate string; anything unparsable counts as 0.
pub fn parse_rate(input: &str) -> f64 {
    sanitize_rate(input.trim().parse::<f64>().unwrap_or(0.0))
}

fn default_classify_rate() -> f64 {
    0.001
}

fn default_generate_rate() -> f64 {
    0.002
}

// ============ Category Display Metadata ============

/// Display metadata for one category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    label: "Other",
    icon: "*",
    accent: "dim",
};

/// Look up display metadata for a category tag.
///
/// The label set is open-ended: unknown tags get the default style and are
/// still rendered verbatim rather than rejected.
pub fn category_style(tag: &str) -> CategoryStyle {
    match tag {
        "Support" => CategoryStyle {
            label: "Support",
            icon: "?",
            accent: "blue",
        },
        "Sales" => CategoryStyle {
            label: "Sales",
            icon: "$",
            accent: "green",
        },
        "Feedback" => CategoryStyle {
            label: "Feedback",
            icon: "!",
            accent: "yellow",
        },
        _ => DEFAULT_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_defaults() {
        let rates = RateConfig::default();
        assert_eq!(rates.classify_per_email, 0.001);
        assert_eq!(rates.generate_per_email, 0.002);
    }

    #[test]
    fn test_rate_sanitization() {
        let rates = RateConfig::new(-1.0, f64::NAN);
        assert_eq!(rates.classify_per_email, 0.0);
        assert_eq!(rates.generate_per_email, 0.0);

        let rates = RateConfig::new(f64::INFINITY, 0.5);
        assert_eq!(rates.classify_per_email, 0.0);
        assert_eq!(rates.generate_per_email, 0.5);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("0.003"), 0.003);
        assert_eq!(parse_rate("  0.1  "), 0.1);
        assert_eq!(parse_rate("abc"), 0.0);
        assert_eq!(parse_rate("-2"), 0.0);
        assert_eq!(parse_rate("NaN"), 0.0);
    }

    #[test]
    fn test_result_wire_names() {
        let json = r#"{"email":"hi","category":"Support","auto_response":"Thanks!"}"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.category, "Support");
        assert_eq!(result.auto_response, "Thanks!");

        let back = serde_json::to_string(&result).unwrap();
        assert!(back.contains("auto_response"));
    }

    #[test]
    fn test_category_style_fallback() {
        assert_eq!(category_style("Sales").accent, "green");
        // Unknown labels still render with the default style.
        assert_eq!(category_style("Billing"), DEFAULT_STYLE);
        assert_eq!(category_style(""), DEFAULT_STYLE);
    }
}
