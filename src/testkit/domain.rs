//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions so tests focus on assertions rather
//! than construction boilerplate. All builders panic on invalid input.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{ExchangeId, Opportunity, Quote, Symbol};

/// Timestamp `ms` milliseconds after the Unix epoch.
pub fn ts(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| panic!("timestamp out of range: {ms}"))
}

/// Quote with the ask one tick above the bid.
pub fn quote(exchange: &str, symbol: &str, ms: i64, bid: f64) -> Quote {
    quote_with_ask(exchange, symbol, ms, bid, bid + 0.01)
}

pub fn quote_with_ask(exchange: &str, symbol: &str, ms: i64, bid: f64, ask: f64) -> Quote {
    Quote::try_new(exchange, symbol, ts(ms), bid, ask)
        .unwrap_or_else(|e| panic!("invalid test quote: {e}"))
}

/// Opportunity whose profit is the raw spread, with no commission.
pub fn opportunity(
    symbol: &str,
    ms: i64,
    buy: (&str, f64),
    sell: (&str, f64),
) -> Opportunity {
    let (buy_exchange, buy_price) = buy;
    let (sell_exchange, sell_price) = sell;
    Opportunity::new(
        Symbol::from(symbol),
        ts(ms),
        ExchangeId::from(buy_exchange),
        buy_price,
        ExchangeId::from(sell_exchange),
        sell_price,
        (sell_price - buy_price) / buy_price * 100.0,
    )
}
