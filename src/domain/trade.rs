//! Executed simulated trade records.
//!
//! A [`TradeRecord`] is appended for every opportunity a ledger manages to
//! fill. Records are plain data: the statistics collector aggregates them and
//! the export adapters flatten them to one row per trade.
//!
//! # Examples
//!
//! ```
//! use arbscope::domain::TradeRecord;
//! use chrono::{TimeZone, Utc};
//! use rust_decimal_macros::dec;
//!
//! let trade = TradeRecord::new(
//!     dec!(0.25),
//!     "BTCUSDT".into(),
//!     Utc.timestamp_millis_opt(0).unwrap(),
//!     ("Binance".into(), 100.0),
//!     ("OKX".into(), 101.0),
//!     0.98,
//!     2.0,
//! );
//!
//! assert_eq!(trade.amount_quote_currency, 200.0);
//! assert!((trade.profit_quote_currency - 1.96).abs() < 1e-12);
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::{ExchangeId, Symbol};
use super::stats::ExchangePair;

/// One executed arbitrage fill inside a simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// Threshold of the simulation instance that executed the trade.
    pub profit_threshold: Decimal,
    pub symbol: Symbol,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub buy_exchange: ExchangeId,
    pub sell_exchange: ExchangeId,
    pub buy_price: f64,
    pub sell_price: f64,
    /// Net profit percentage of the opportunity that was filled.
    pub net_profit_pct: f64,
    /// Filled size in base currency.
    pub amount_base: f64,
    /// Filled size valued at the buy price.
    pub amount_quote_currency: f64,
    /// Estimated profit: `amount_quote_currency * net_profit_pct / 100`.
    pub profit_quote_currency: f64,
}

impl TradeRecord {
    /// Build a record, deriving the quote-currency amount and profit.
    pub fn new(
        profit_threshold: Decimal,
        symbol: Symbol,
        timestamp: DateTime<Utc>,
        buy: (ExchangeId, f64),
        sell: (ExchangeId, f64),
        net_profit_pct: f64,
        amount_base: f64,
    ) -> Self {
        let (buy_exchange, buy_price) = buy;
        let (sell_exchange, sell_price) = sell;
        let amount_quote_currency = amount_base * buy_price;
        let profit_quote_currency = amount_quote_currency * (net_profit_pct / 100.0);
        Self {
            profit_threshold,
            symbol,
            timestamp,
            buy_exchange,
            sell_exchange,
            buy_price,
            sell_price,
            net_profit_pct,
            amount_base,
            amount_quote_currency,
            profit_quote_currency,
        }
    }

    /// Exchange pair bucket, independent of trade direction.
    #[must_use]
    pub fn pair(&self) -> ExchangePair {
        ExchangePair::new(self.buy_exchange.clone(), self.sell_exchange.clone())
    }

    /// Total order used to fold trades deterministically.
    ///
    /// Floating-point fields are compared with `total_cmp` so the order is
    /// defined for every value.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.symbol
            .cmp(&other.symbol)
            .then_with(|| self.profit_threshold.cmp(&other.profit_threshold))
            .then_with(|| self.timestamp.cmp(&other.timestamp))
            .then_with(|| self.buy_exchange.cmp(&other.buy_exchange))
            .then_with(|| self.sell_exchange.cmp(&other.sell_exchange))
            .then_with(|| self.buy_price.total_cmp(&other.buy_price))
            .then_with(|| self.sell_price.total_cmp(&other.sell_price))
            .then_with(|| self.net_profit_pct.total_cmp(&other.net_profit_pct))
            .then_with(|| self.amount_base.total_cmp(&other.amount_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn trade(buy: &str, sell: &str, ms: i64) -> TradeRecord {
        TradeRecord::new(
            dec!(0.1),
            Symbol::from("ETHUSDT"),
            Utc.timestamp_millis_opt(ms).unwrap(),
            (ExchangeId::from(buy), 10.0),
            (ExchangeId::from(sell), 11.0),
            9.8,
            1.0,
        )
    }

    #[test]
    fn profit_follows_amount_and_pct() {
        let t = trade("A", "B", 0);
        assert_eq!(t.amount_quote_currency, 10.0);
        assert!((t.profit_quote_currency - 0.98).abs() < 1e-12);
    }

    #[test]
    fn pair_ignores_direction() {
        assert_eq!(trade("A", "B", 0).pair(), trade("B", "A", 0).pair());
    }

    #[test]
    fn canonical_cmp_orders_by_time_then_exchange() {
        let early = trade("B", "A", 0);
        let late = trade("A", "B", 1);
        assert_eq!(early.canonical_cmp(&late), Ordering::Less);
        assert_eq!(
            trade("A", "B", 1).canonical_cmp(&trade("B", "A", 1)),
            Ordering::Less
        );
    }
}
