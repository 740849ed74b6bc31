//! Cross-exchange maker-taker opportunity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{ExchangeId, Symbol};

/// A detected arbitrage opportunity between two exchanges.
///
/// The buy leg rests on `buy_exchange` at its bid (maker), the sell leg crosses
/// the book on `sell_exchange` at its bid (taker). `profit_pct` is already net
/// of commission. Opportunities are never mutated after detection, so a single
/// list is shared read-only by every simulation of the same symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    symbol: Symbol,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    buy_exchange: ExchangeId,
    buy_price: f64,
    sell_exchange: ExchangeId,
    sell_price: f64,
    profit_pct: f64,
}

impl Opportunity {
    /// Create an opportunity from already-computed legs.
    pub fn new(
        symbol: Symbol,
        timestamp: DateTime<Utc>,
        buy_exchange: ExchangeId,
        buy_price: f64,
        sell_exchange: ExchangeId,
        sell_price: f64,
        profit_pct: f64,
    ) -> Self {
        Self {
            symbol,
            timestamp,
            buy_exchange,
            buy_price,
            sell_exchange,
            sell_price,
            profit_pct,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn buy_exchange(&self) -> &ExchangeId {
        &self.buy_exchange
    }

    pub fn buy_price(&self) -> f64 {
        self.buy_price
    }

    pub fn sell_exchange(&self) -> &ExchangeId {
        &self.sell_exchange
    }

    pub fn sell_price(&self) -> f64 {
        self.sell_price
    }

    /// Net profit percentage after commission.
    pub fn profit_pct(&self) -> f64 {
        self.profit_pct
    }
}
