//! Statistics domain types.
//!
//! Aggregates produced by the statistics collector: totals per symbol, per
//! profit threshold within a symbol, and trade counts per exchange pair.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::{ExchangeId, Symbol};

/// Unordered pair of exchanges.
///
/// The two names are sorted on construction so a buy A / sell B trade and a
/// buy B / sell A trade land in the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct ExchangePair {
    first: ExchangeId,
    second: ExchangeId,
}

impl ExchangePair {
    pub fn new(a: ExchangeId, b: ExchangeId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &ExchangeId {
        &self.first
    }

    pub fn second(&self) -> &ExchangeId {
        &self.second
    }
}

impl fmt::Display for ExchangePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl From<ExchangePair> for String {
    fn from(pair: ExchangePair) -> Self {
        pair.to_string()
    }
}

/// Results of one (symbol, threshold) simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThresholdStats {
    pub trades: usize,
    pub profit: f64,
    pub volume: f64,
    /// Mean net profit percentage of executed trades.
    pub average_profit_pct: f64,
    pub pair_counts: BTreeMap<ExchangePair, usize>,
    #[serde(skip)]
    profit_pct_sum: f64,
}

impl ThresholdStats {
    pub(crate) fn add(&mut self, pair: ExchangePair, profit: f64, volume: f64, profit_pct: f64) {
        self.trades += 1;
        self.profit += profit;
        self.volume += volume;
        self.profit_pct_sum += profit_pct;
        self.average_profit_pct = self.profit_pct_sum / self.trades as f64;
        *self.pair_counts.entry(pair).or_default() += 1;
    }
}

/// Results for one symbol across all of its thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolStats {
    pub total_trades: usize,
    pub total_profit: f64,
    pub by_threshold: BTreeMap<Decimal, ThresholdStats>,
}

impl SymbolStats {
    /// Threshold whose simulation earned the most.
    ///
    /// Ties resolve to the lowest threshold.
    #[must_use]
    pub fn best_threshold(&self) -> Option<Decimal> {
        let mut best: Option<(Decimal, f64)> = None;
        for (threshold, stats) in &self.by_threshold {
            match best {
                Some((_, profit)) if stats.profit <= profit => {}
                _ => best = Some((*threshold, stats.profit)),
            }
        }
        best.map(|(threshold, _)| threshold)
    }
}

/// Aggregate over every simulation instance of a backtest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateReport {
    pub total_trades: usize,
    pub total_profit: f64,
    pub total_volume: f64,
    pub by_symbol: BTreeMap<Symbol, SymbolStats>,
}

impl AggregateReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_trades == 0
    }

    /// Stats for a single (symbol, threshold) instance, if it traded.
    #[must_use]
    pub fn instance(&self, symbol: &Symbol, threshold: Decimal) -> Option<&ThresholdStats> {
        self.by_symbol
            .get(symbol)
            .and_then(|s| s.by_threshold.get(&threshold))
    }
}
