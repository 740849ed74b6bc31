//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate a configuration file and print the effective settings.
pub fn execute_config(path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(path)?;

    output::section("Configuration Check");
    match path {
        Some(path) => {
            output::field("Config", path.display());
            output::success("Configuration file is valid");
        }
        None => output::note("No config file given; showing defaults"),
    }

    output::section("Data");
    output::field("Path", config.data.path.display());
    output::field("Exchanges", list_or_all(&config.data.exchanges));
    output::field("Symbols", list_or_all(&config.data.symbols));
    output::field("Start", config.data.start.as_deref().unwrap_or("-"));
    output::field("End", config.data.end.as_deref().unwrap_or("-"));
    if !config.data.path.exists() {
        output::warning("Data path does not exist yet");
    }

    let backtest = config.backtest.to_backtest_config();
    output::section("Backtest");
    output::field("Commission", format!("{}%", backtest.commission_pct));
    output::field("Model", backtest.commission_model.as_str());
    output::field(
        "Thresholds",
        backtest
            .profit_thresholds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    );
    output::field(
        "Balance",
        format!("{} {}", backtest.initial_quote_balance, backtest.quote_currency),
    );
    output::field("Swap ratio", backtest.swap_ratio);
    output::field("Workers", backtest.worker_count());

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::success("Configuration check complete");
    Ok(())
}

fn list_or_all(items: &[String]) -> String {
    if items.is_empty() {
        "all".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_list_or_all() {
        assert_eq!(list_or_all(&[]), "all");
        assert_eq!(
            list_or_all(&["Binance".to_string(), "OKX".to_string()]),
            "Binance, OKX"
        );
    }

    #[test]
    fn test_execute_config_defaults() {
        assert!(execute_config(None).is_ok());
    }

    #[test]
    fn test_execute_config_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backtest]\nswap_ratio = 2.0").unwrap();
        assert!(execute_config(Some(file.path())).is_err());
    }
}
