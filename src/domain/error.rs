//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! They are returned by `try_new` constructors and by the simulation factory,
//! which refuses to fund a ledger from an inconsistent configuration.
//!
//! # Examples
//!
//! ```
//! use arbscope::domain::error::DomainError;
//! use arbscope::domain::Quote;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.timestamp_millis_opt(0).unwrap();
//! let result = Quote::try_new("Binance", "BTCUSDT", ts, -1.0, 100.0);
//!
//! assert!(matches!(result, Err(DomainError::NegativePrice { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Quote prices must be non-negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativePrice {
        /// Which side of the quote was invalid.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Quote prices must be finite.
    #[error("{field} must be finite")]
    NonFinitePrice {
        /// Which side of the quote was invalid.
        field: &'static str,
    },

    /// A simulation needs at least one exchange wallet.
    #[error("exchange list cannot be empty")]
    NoExchanges,

    /// Commission must be a finite percentage in [0, 100).
    #[error("commission must be in [0, 100), got {value}")]
    InvalidCommission {
        /// The rejected commission percentage.
        value: f64,
    },

    /// Starting balance must be strictly positive.
    #[error("initial balance must be positive, got {value}")]
    InvalidBalance {
        /// The rejected balance.
        value: f64,
    },

    /// Swap ratio must be a fraction in [0, 1].
    #[error("swap ratio must be in [0, 1], got {value}")]
    InvalidSwapRatio {
        /// The rejected ratio.
        value: f64,
    },

    /// Symbol does not trade against the configured quote currency.
    #[error("symbol {symbol} is not quoted in {quote_currency}")]
    SymbolCurrencyMismatch {
        /// The offending symbol.
        symbol: String,
        /// The configured quote currency.
        quote_currency: String,
    },

    /// Profit thresholds must be non-negative.
    #[error("profit threshold must be non-negative, got {value}")]
    InvalidThreshold {
        /// The rejected threshold.
        value: rust_decimal::Decimal,
    },
}
