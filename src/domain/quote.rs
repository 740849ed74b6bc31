//! Best bid/ask quote observed on one exchange.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DomainError;
use super::ids::{ExchangeId, Symbol};

/// Top-of-book snapshot for one (exchange, symbol) at a point in time.
///
/// Quotes are immutable once ingested. Prices are validated on construction:
/// they must be finite and non-negative. A zero bid is legal (some feeds emit
/// empty books) but never participates in opportunity detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    exchange: ExchangeId,
    symbol: Symbol,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    best_bid: f64,
    best_ask: f64,
}

impl Quote {
    /// Create a validated quote.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinitePrice`] or [`DomainError::NegativePrice`]
    /// when either side of the book is invalid.
    pub fn try_new(
        exchange: impl Into<ExchangeId>,
        symbol: impl Into<Symbol>,
        timestamp: DateTime<Utc>,
        best_bid: f64,
        best_ask: f64,
    ) -> Result<Self, DomainError> {
        validate_price("best_bid", best_bid)?;
        validate_price("best_ask", best_ask)?;
        Ok(Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            timestamp,
            best_bid,
            best_ask,
        })
    }

    pub fn exchange(&self) -> &ExchangeId {
        &self.exchange
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn best_bid(&self) -> f64 {
        self.best_bid
    }

    pub fn best_ask(&self) -> f64 {
        self.best_ask
    }

    /// Whether the bid side can take part in opportunity detection.
    #[must_use]
    pub fn has_bid(&self) -> bool {
        self.best_bid > 0.0
    }

    /// Whether the ask side can be used to seed an initial swap.
    #[must_use]
    pub fn has_ask(&self) -> bool {
        self.best_ask > 0.0
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinitePrice { field });
    }
    if value < 0.0 {
        return Err(DomainError::NegativePrice { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn try_new_accepts_zero_prices() {
        let quote = Quote::try_new("Binance", "BTCUSDT", ts(0), 0.0, 0.0).unwrap();
        assert!(!quote.has_bid());
        assert!(!quote.has_ask());
    }

    #[test]
    fn try_new_rejects_negative_ask() {
        let err = Quote::try_new("Binance", "BTCUSDT", ts(0), 1.0, -0.5).unwrap_err();
        assert_eq!(
            err,
            DomainError::NegativePrice {
                field: "best_ask",
                value: -0.5
            }
        );
    }

    #[test]
    fn try_new_rejects_nan() {
        let err = Quote::try_new("Binance", "BTCUSDT", ts(0), f64::NAN, 1.0).unwrap_err();
        assert_eq!(err, DomainError::NonFinitePrice { field: "best_bid" });
    }

    #[test]
    fn symbol_is_normalized_on_ingest() {
        let quote = Quote::try_new("OKX", "btc-usdt", ts(5), 1.0, 2.0).unwrap();
        assert_eq!(quote.symbol().as_str(), "BTCUSDT");
        assert_eq!(quote.timestamp().timestamp_millis(), 5);
    }
}
