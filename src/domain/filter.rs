//! Ingestion filter for quote streams.

use chrono::{DateTime, Utc};

use super::ids::{ExchangeId, Symbol};
use super::quote::Quote;

/// Narrows which quotes enter the store.
///
/// Empty allow-lists admit everything. The time range is half-open:
/// `start` is inclusive and `end` exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteFilter {
    pub exchanges: Vec<ExchangeId>,
    pub symbols: Vec<Symbol>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl QuoteFilter {
    #[must_use]
    pub fn accepts(&self, quote: &Quote) -> bool {
        if !self.exchanges.is_empty() && !self.exchanges.contains(quote.exchange()) {
            return false;
        }
        if !self.symbols.is_empty() && !self.symbols.contains(quote.symbol()) {
            return false;
        }
        if self.start.is_some_and(|start| quote.timestamp() < start) {
            return false;
        }
        if self.end.is_some_and(|end| quote.timestamp() >= end) {
            return false;
        }
        true
    }
}
