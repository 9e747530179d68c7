use anyhow::{bail, Context};
use mail_triage::models::{category_style, parse_rate, RateConfig};
use mail_triage::services::{
    estimate_cost, BatchError, BatchRunner, Classifier, ClassifierClient, ConfigStore,
};
use std::io::Read;
use std::time::Duration;

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

const VALUE_FLAGS: &[&str] = &[
    "--endpoint",
    "--classify-rate",
    "--generate-rate",
    "--timeout",
    "--out",
];

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<String> {
    let mut i = 0;
    while i < args.len() {
        let a = &args[i];
        if VALUE_FLAGS.contains(&a.as_str()) {
            i += 2;
            continue;
        }
        if a.starts_with("--") {
            i += 1;
            continue;
        }
        return Some(a.clone());
    }
    None
}

fn usage() {
    eprintln!(
        "Usage:\n  triage [<emails.txt>] [--endpoint <url>] [--classify-rate <n>] [--generate-rate <n>] [--timeout <secs>] [--ping] [--out <json_path>]\n\nNotes:\n  - Reads pasted emails from the file, or stdin when no file is given.\n  - Emails are separated by line breaks; blank lines are ignored.\n  - `--ping` only checks service health and exits.\n  - Endpoint and rates default to the saved config (~/.config/mail-triage)."
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mail_triage::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        usage();
        return Ok(());
    }

    // Saved config supplies defaults; flags override per invocation.
    // An unreadable config file falls back to defaults rather than aborting.
    let config = ConfigStore::default_config_dir()
        .map(ConfigStore::new)
        .and_then(|store| store.load().ok())
        .unwrap_or_default();

    let endpoint = parse_arg_value(&args, "--endpoint").or(config.endpoint.clone());
    let timeout_secs: u64 = parse_arg_value(&args, "--timeout")
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.timeout_secs);

    let rates = RateConfig::new(
        parse_arg_value(&args, "--classify-rate")
            .map(|s| parse_rate(&s))
            .unwrap_or(config.rates.classify_per_email),
        parse_arg_value(&args, "--generate-rate")
            .map(|s| parse_rate(&s))
            .unwrap_or(config.rates.generate_per_email),
    );

    let client = endpoint
        .as_deref()
        .map(|url| ClassifierClient::with_timeout(url, Duration::from_secs(timeout_secs)));

    if has_flag(&args, "--ping") {
        let Some(client) = client else {
            bail!("no classification endpoint configured (use --endpoint)");
        };
        match client.health_check().await {
            Ok(payload) => println!("Service healthy: {}", payload),
            Err(e) => bail!("health check failed: {e}"),
        }
        return Ok(());
    }

    let raw = match positional(&args) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("read {path} failed"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin failed")?;
            buf
        }
    };

    let mut runner = BatchRunner::new(client);
    let outcome = runner.run(&raw).await;

    for (i, result) in runner.results().iter().enumerate() {
        let style = category_style(&result.category);
        println!(
            "{:>3}. {} [{}] {}  <- {}",
            i + 1,
            style.icon,
            result.category,
            preview(&result.auto_response, 60),
            preview(&result.email, 40)
        );
    }
    println!(
        "Estimated cost: {} ({} classified)",
        estimate_cost(runner.results().len(), &rates),
        runner.results().len()
    );

    if let Some(out_path) = parse_arg_value(&args, "--out") {
        let json = serde_json::to_string_pretty(runner.results())?;
        std::fs::write(&out_path, json).with_context(|| format!("write {out_path} failed"))?;
        println!("Results written to {out_path}");
    }

    match outcome {
        Ok(_) => Ok(()),
        Err(e @ BatchError::NoEndpoint) => {
            usage();
            bail!("{e}");
        }
        Err(e) => bail!("{e}"),
    }
}
