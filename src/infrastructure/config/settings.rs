//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Every section and field has a default, so an empty file is a valid
//! configuration that reproduces the standard threshold sweep.
//!
//! # Example
//!
//! ```no_run
//! use arbscope::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::backtest::{default_thresholds, BacktestConfig};
use crate::application::ledger::{
    DEFAULT_COMMISSION_PCT, DEFAULT_INITIAL_QUOTE_BALANCE, DEFAULT_QUOTE_CURRENCY,
    DEFAULT_SWAP_RATIO,
};
use crate::domain::{CommissionModel, ExchangeId, QuoteFilter, Symbol};
use crate::error::{ConfigError, Result};

/// Where quotes come from and which of them to keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File or directory of `*.jsonl` quote files.
    pub path: PathBuf,
    /// Exchange allow-list; empty keeps every exchange.
    pub exchanges: Vec<String>,
    /// Symbol allow-list; empty keeps every symbol.
    pub symbols: Vec<String>,
    /// Inclusive start, as a UTC date or RFC 3339 instant.
    pub start: Option<String>,
    /// Exclusive end, as a UTC date or RFC 3339 instant.
    pub end: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/market_data"),
            exchanges: Vec::new(),
            symbols: Vec::new(),
            start: None,
            end: None,
        }
    }
}

impl DataConfig {
    /// Ingestion filter built from the allow-lists and time range.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` or `end` cannot be parsed.
    pub fn filter(&self) -> Result<QuoteFilter> {
        Ok(QuoteFilter {
            exchanges: self.exchanges.iter().map(ExchangeId::new).collect(),
            symbols: self.symbols.iter().map(Symbol::new).collect(),
            start: self
                .start
                .as_deref()
                .map(|s| parse_instant("start", s))
                .transpose()?,
            end: self
                .end
                .as_deref()
                .map(|s| parse_instant("end", s))
                .transpose()?,
        })
    }
}

/// Parse a UTC date (`2025-01-31`, midnight) or an RFC 3339 instant.
pub fn parse_instant(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            ConfigError::InvalidValue {
                field,
                reason: format!("expected YYYY-MM-DD or RFC 3339, got {value:?}"),
            }
            .into()
        })
}

/// Simulation parameters shared by every instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BacktestSettings {
    #[serde(default = "default_commission_pct")]
    pub commission_pct: f64,
    #[serde(default)]
    pub commission_model: CommissionModel,
    #[serde(default = "default_thresholds")]
    pub profit_thresholds: Vec<Decimal>,
    #[serde(default = "default_initial_quote_balance")]
    pub initial_quote_balance: f64,
    #[serde(default = "default_swap_ratio")]
    pub swap_ratio: f64,
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
    /// Worker threads; defaults to the number of CPUs.
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_commission_pct() -> f64 {
    DEFAULT_COMMISSION_PCT
}

fn default_initial_quote_balance() -> f64 {
    DEFAULT_INITIAL_QUOTE_BALANCE
}

fn default_swap_ratio() -> f64 {
    DEFAULT_SWAP_RATIO
}

fn default_quote_currency() -> String {
    DEFAULT_QUOTE_CURRENCY.to_string()
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            commission_pct: default_commission_pct(),
            commission_model: CommissionModel::default(),
            profit_thresholds: default_thresholds(),
            initial_quote_balance: default_initial_quote_balance(),
            swap_ratio: default_swap_ratio(),
            quote_currency: default_quote_currency(),
            workers: None,
        }
    }
}

impl BacktestSettings {
    #[must_use]
    pub fn to_backtest_config(&self) -> BacktestConfig {
        BacktestConfig {
            commission_pct: self.commission_pct,
            commission_model: self.commission_model,
            profit_thresholds: self.profit_thresholds.clone(),
            initial_quote_balance: self.initial_quote_balance,
            swap_ratio: self.swap_ratio,
            quote_currency: self.quote_currency.clone(),
            workers: self.workers,
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.finalize()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if given, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate, then sort and de-duplicate the threshold list.
    ///
    /// Call again after applying command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn finalize(&mut self) -> Result<()> {
        self.validate()?;
        self.backtest.profit_thresholds.sort();
        self.backtest.profit_thresholds.dedup();
        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn validate(&self) -> Result<()> {
        let backtest = &self.backtest;
        if !backtest.commission_pct.is_finite() || !(0.0..100.0).contains(&backtest.commission_pct)
        {
            return Err(ConfigError::InvalidValue {
                field: "commission_pct",
                reason: "must be in [0, 100)".to_string(),
            }
            .into());
        }
        if backtest.profit_thresholds.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "profit_thresholds",
                reason: "must contain at least one threshold".to_string(),
            }
            .into());
        }
        if backtest
            .profit_thresholds
            .iter()
            .any(Decimal::is_sign_negative)
        {
            return Err(ConfigError::InvalidValue {
                field: "profit_thresholds",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if !backtest.initial_quote_balance.is_finite() || backtest.initial_quote_balance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_quote_balance",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&backtest.swap_ratio) {
            return Err(ConfigError::InvalidValue {
                field: "swap_ratio",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if backtest.workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "workers",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if backtest.quote_currency.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "quote_currency",
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }

        let filter = self.data.filter()?;
        if let (Some(start), Some(end)) = (filter.start, filter.end) {
            if start >= end {
                return Err(ConfigError::InvalidValue {
                    field: "end",
                    reason: "must be after start".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.backtest.commission_pct, 0.02);
        assert_eq!(config.backtest.initial_quote_balance, 1000.0);
        assert_eq!(config.backtest.swap_ratio, 0.5);
        assert_eq!(config.backtest.quote_currency, "USDT");
        assert_eq!(config.backtest.profit_thresholds.len(), 6);
        assert_eq!(config.backtest.commission_model, CommissionModel::MakerTaker);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn thresholds_are_sorted_and_deduplicated() {
        let config = Config::parse_toml(
            r#"
[backtest]
profit_thresholds = [0.5, 0.1, 0.25, 0.1]
"#,
        )
        .unwrap();
        assert_eq!(
            config.backtest.profit_thresholds,
            vec![dec!(0.1), dec!(0.25), dec!(0.5)]
        );
    }

    #[test]
    fn commission_model_parses_snake_case() {
        let config = Config::parse_toml(
            r#"
[backtest]
commission_model = "taker_taker"
"#,
        )
        .unwrap();
        assert_eq!(config.backtest.commission_model, CommissionModel::TakerTaker);
    }

    #[test]
    fn rejects_commission_out_of_range() {
        let result = Config::parse_toml("[backtest]\ncommission_pct = 100.0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "commission_pct",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_thresholds() {
        let result = Config::parse_toml("[backtest]\nprofit_thresholds = []\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "profit_thresholds",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_inverted_time_range() {
        let result = Config::parse_toml(
            r#"
[data]
start = "2025-02-01"
end = "2025-01-01"
"#,
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "end", .. }))
        ));
    }

    #[test]
    fn parse_instant_accepts_dates_and_rfc3339() {
        let date = parse_instant("start", "2025-01-02").unwrap();
        assert_eq!(date.to_rfc3339(), "2025-01-02T00:00:00+00:00");
        let instant = parse_instant("start", "2025-01-02T03:04:05+01:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-01-02T02:04:05+00:00");
        assert!(parse_instant("start", "yesterday").is_err());
    }

    #[test]
    fn data_filter_normalizes_symbols() {
        let config = Config::parse_toml(
            r#"
[data]
symbols = ["btc-usdt"]
exchanges = ["OKX"]
"#,
        )
        .unwrap();
        let filter = config.data.filter().unwrap();
        assert_eq!(filter.symbols, vec![Symbol::from("BTCUSDT")]);
        assert_eq!(filter.exchanges, vec![ExchangeId::from("OKX")]);
    }
}
