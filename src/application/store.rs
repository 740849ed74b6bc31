//! In-memory quote store partitioned by symbol and exchange.
//!
//! Quotes are kept sorted by timestamp per (symbol, exchange) at all times.
//! Equal timestamps keep ingestion order. Bulk loads append and then
//! stable-sort each stream once.

use std::collections::BTreeMap;

use crate::domain::{ExchangeId, Quote, QuoteFilter, Symbol};

type Streams = BTreeMap<ExchangeId, Vec<Quote>>;

/// Quotes grouped by symbol, then by exchange.
#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    symbols: BTreeMap<Symbol, Streams>,
    len: usize,
}

impl QuoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an unordered quote iterator.
    pub fn from_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let mut store = Self::new();
        store.extend(quotes);
        store
    }

    /// Insert one quote after every quote with an equal or earlier timestamp.
    pub fn insert(&mut self, quote: Quote) {
        let stream = self.stream_mut(&quote);
        match stream.last() {
            Some(last) if last.timestamp() > quote.timestamp() => {
                let at = stream.partition_point(|q| q.timestamp() <= quote.timestamp());
                stream.insert(at, quote);
            }
            _ => stream.push(quote),
        }
        self.len += 1;
    }

    /// Append a batch of quotes, then restore time order once per stream.
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        for quote in quotes {
            self.stream_mut(&quote).push(quote);
            self.len += 1;
        }
        for streams in self.symbols.values_mut() {
            for stream in streams.values_mut() {
                stream.sort_by_key(Quote::timestamp);
            }
        }
    }

    /// Insert the quotes accepted by `filter` and return how many were dropped.
    pub fn extend_filtered(
        &mut self,
        quotes: impl IntoIterator<Item = Quote>,
        filter: &QuoteFilter,
    ) -> usize {
        let mut dropped = 0;
        let accepted: Vec<Quote> = quotes
            .into_iter()
            .filter(|quote| {
                let keep = filter.accepts(quote);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();
        self.extend(accepted);
        dropped
    }

    fn stream_mut(&mut self, quote: &Quote) -> &mut Vec<Quote> {
        self.symbols
            .entry(quote.symbol().clone())
            .or_default()
            .entry(quote.exchange().clone())
            .or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbols in lexical order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.keys()
    }

    /// Exchanges quoting `symbol`, in lexical order.
    #[must_use]
    pub fn exchanges(&self, symbol: &Symbol) -> Vec<&ExchangeId> {
        self.symbols
            .get(symbol)
            .map(|streams| streams.keys().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn partition(&self, symbol: &Symbol) -> Option<SymbolPartition<'_>> {
        self.symbols
            .get_key_value(symbol)
            .map(|(symbol, streams)| SymbolPartition { symbol, streams })
    }

    /// Every symbol partition in lexical symbol order.
    pub fn partitions(&self) -> impl Iterator<Item = SymbolPartition<'_>> {
        self.symbols
            .iter()
            .map(|(symbol, streams)| SymbolPartition { symbol, streams })
    }

    #[must_use]
    pub fn first_valid_ask(&self, symbol: &Symbol, exchange: &ExchangeId) -> Option<f64> {
        self.partition(symbol)?.first_valid_ask(exchange)
    }

    /// Quote counts per (symbol, exchange).
    #[must_use]
    pub fn counts(&self) -> BTreeMap<(Symbol, ExchangeId), usize> {
        self.symbols
            .iter()
            .flat_map(|(symbol, streams)| {
                streams.iter().map(move |(exchange, quotes)| {
                    ((symbol.clone(), exchange.clone()), quotes.len())
                })
            })
            .collect()
    }
}

/// Read-only view of one symbol's per-exchange quote streams.
#[derive(Debug, Clone, Copy)]
pub struct SymbolPartition<'a> {
    symbol: &'a Symbol,
    streams: &'a Streams,
}

impl<'a> SymbolPartition<'a> {
    pub fn symbol(&self) -> &'a Symbol {
        self.symbol
    }

    pub fn exchanges(&self) -> impl Iterator<Item = &'a ExchangeId> {
        self.streams.keys()
    }

    pub fn exchange_count(&self) -> usize {
        self.streams.len()
    }

    /// Quotes for one exchange, sorted by timestamp.
    pub fn stream(&self, exchange: &ExchangeId) -> &'a [Quote] {
        self.streams.get(exchange).map_or(&[], Vec::as_slice)
    }

    pub fn quote_count(&self) -> usize {
        self.streams.values().map(Vec::len).sum()
    }

    /// Ask of the earliest quote on `exchange` with a positive ask.
    pub fn first_valid_ask(&self, exchange: &ExchangeId) -> Option<f64> {
        self.stream(exchange)
            .iter()
            .find(|q| q.has_ask())
            .map(Quote::best_ask)
    }

    /// First valid ask for every exchange that has one.
    pub fn seed_prices(&self) -> BTreeMap<ExchangeId, f64> {
        self.streams
            .keys()
            .filter_map(|exchange| {
                self.first_valid_ask(exchange)
                    .map(|price| (exchange.clone(), price))
            })
            .collect()
    }
}
