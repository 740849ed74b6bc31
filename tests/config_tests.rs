use std::fs;
use std::path::PathBuf;

use arbscope::domain::CommissionModel;
use arbscope::error::{ConfigError, Error};
use arbscope::infrastructure::config::settings::Config;
use arbscope::testkit;
use rust_decimal_macros::dec;

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("arbscope.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_full_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_temp_config(
        &dir,
        r#"
[data]
path = "quotes"
exchanges = ["Binance", "OKX"]
symbols = ["btc-usdt"]
start = "2025-01-01"
end = "2025-02-01T00:00:00Z"

[backtest]
commission_pct = 0.1
commission_model = "taker_taker"
profit_thresholds = [0.5, 0.25]
initial_quote_balance = 500.0
swap_ratio = 0.25
quote_currency = "usdt"
workers = 3

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).expect("valid config");
    assert_eq!(config.data.path, PathBuf::from("quotes"));
    assert_eq!(config.backtest.commission_model, CommissionModel::TakerTaker);
    assert_eq!(config.backtest.profit_thresholds, vec![dec!(0.25), dec!(0.5)]);
    assert_eq!(config.backtest.workers, Some(3));
    assert_eq!(config.logging.format, "json");

    let filter = config.data.filter().expect("filter");
    assert_eq!(filter.symbols.len(), 1);
    assert_eq!(filter.symbols[0].as_str(), "BTCUSDT");
    assert!(filter.start.is_some() && filter.end.is_some());

    let backtest = config.backtest.to_backtest_config();
    assert!(backtest.validate().is_ok());
    assert_eq!(backtest.worker_count(), 3);
}

#[test]
fn testkit_config_is_valid() {
    let config = Config::parse_toml(&testkit::config::toml("data")).expect("valid config");
    assert_eq!(config.backtest.profit_thresholds, vec![dec!(0.1), dec!(0.5)]);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn config_rejects_negative_threshold() {
    let result = Config::parse_toml("[backtest]\nprofit_thresholds = [0.1, -0.2]\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "profit_thresholds",
            ..
        }))
    ));
}

#[test]
fn config_rejects_zero_workers() {
    let result = Config::parse_toml("[backtest]\nworkers = 0\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field: "workers", .. }))
    ));
}

#[test]
fn config_rejects_unknown_log_format() {
    let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
    ));
}

#[test]
fn config_rejects_bad_date() {
    let result = Config::parse_toml("[data]\nstart = \"last week\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field: "start", .. }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let result = Config::parse_toml("[backtest\ncommission_pct = 1");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = Config::load(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
