//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use rust_decimal::Decimal;

use crate::application::BacktestConfig;

/// Small, fast backtest config: two workers, given thresholds, zero commission.
pub fn backtest(thresholds: &[Decimal]) -> BacktestConfig {
    BacktestConfig {
        commission_pct: 0.0,
        profit_thresholds: thresholds.to_vec(),
        workers: Some(2),
        ..BacktestConfig::default()
    }
}

/// Minimal TOML config pointing at `data_path`.
pub fn toml(data_path: &str) -> String {
    format!(
        r#"
[data]
path = "{data_path}"

[backtest]
commission_pct = 0.2
profit_thresholds = [0.1, 0.5]
workers = 2

[logging]
level = "warn"
"#
    )
}
