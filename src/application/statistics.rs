//! Thread-safe collector of executed trades.
//!
//! Workers append trades concurrently. Aggregation sorts a snapshot into a
//! canonical order before folding, so floating-point totals depend only on
//! the multiset of recorded trades and never on insertion order.

use parking_lot::Mutex;

use crate::domain::{AggregateReport, TradeRecord};

#[derive(Debug, Default)]
pub struct StatisticsCollector {
    trades: Mutex<Vec<TradeRecord>>,
}

impl StatisticsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, trade: TradeRecord) {
        self.trades.lock().push(trade);
    }

    /// Append a worker's batch under a single lock.
    pub fn extend(&self, trades: impl IntoIterator<Item = TradeRecord>) {
        self.trades.lock().extend(trades);
    }

    pub fn len(&self) -> usize {
        self.trades.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.lock().is_empty()
    }

    /// Snapshot of every recorded trade in canonical order.
    #[must_use]
    pub fn trades(&self) -> Vec<TradeRecord> {
        let mut trades = self.trades.lock().clone();
        trades.sort_by(TradeRecord::canonical_cmp);
        trades
    }

    /// Aggregate by symbol, then threshold, then exchange pair.
    #[must_use]
    pub fn results(&self) -> AggregateReport {
        aggregate(&self.trades())
    }
}

/// Fold canonically ordered trades into a report.
fn aggregate(trades: &[TradeRecord]) -> AggregateReport {
    let mut report = AggregateReport::default();
    for trade in trades {
        report.total_trades += 1;
        report.total_profit += trade.profit_quote_currency;
        report.total_volume += trade.amount_quote_currency;

        let symbol = report.by_symbol.entry(trade.symbol.clone()).or_default();
        symbol.total_trades += 1;
        symbol.total_profit += trade.profit_quote_currency;
        symbol
            .by_threshold
            .entry(trade.profit_threshold)
            .or_default()
            .add(
                trade.pair(),
                trade.profit_quote_currency,
                trade.amount_quote_currency,
                trade.net_profit_pct,
            );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExchangePair, Symbol};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trade(threshold: Decimal, buy: &str, sell: &str, ms: i64, amount: f64) -> TradeRecord {
        TradeRecord::new(
            threshold,
            Symbol::from("BTCUSDT"),
            Utc.timestamp_millis_opt(ms).unwrap(),
            (buy.into(), 100.0),
            (sell.into(), 101.0),
            0.98,
            amount,
        )
    }

    #[test]
    fn results_group_by_symbol_and_threshold() {
        let collector = StatisticsCollector::new();
        collector.record(trade(dec!(0.1), "A", "B", 0, 1.0));
        collector.record(trade(dec!(0.1), "B", "A", 1, 1.0));
        collector.record(trade(dec!(0.5), "A", "C", 2, 2.0));

        let report = collector.results();
        assert_eq!(report.total_trades, 3);
        let btc = &report.by_symbol[&Symbol::from("BTCUSDT")];
        assert_eq!(btc.total_trades, 3);
        let low = &btc.by_threshold[&dec!(0.1)];
        assert_eq!(low.trades, 2);
        assert_eq!(
            low.pair_counts[&ExchangePair::new("A".into(), "B".into())],
            2
        );
        assert_eq!(btc.by_threshold[&dec!(0.5)].trades, 1);
    }

    #[test]
    fn insertion_order_does_not_change_totals() {
        let trades: Vec<TradeRecord> = (0..50)
            .map(|i| trade(dec!(0.25), "A", "B", i, 0.1 + i as f64 * 0.037))
            .collect();

        let forward = StatisticsCollector::new();
        forward.extend(trades.iter().cloned());
        let backward = StatisticsCollector::new();
        backward.extend(trades.iter().rev().cloned());

        assert_eq!(forward.results(), backward.results());
        assert_eq!(
            forward.results().total_profit.to_bits(),
            backward.results().total_profit.to_bits()
        );
    }

    #[test]
    fn concurrent_records_are_all_kept() {
        let collector = StatisticsCollector::new();
        std::thread::scope(|scope| {
            for worker in 0..4 {
                let collector = &collector;
                scope.spawn(move || {
                    for i in 0..25 {
                        collector.record(trade(dec!(0.1), "A", "B", worker * 100 + i, 1.0));
                    }
                });
            }
        });
        assert_eq!(collector.len(), 100);
        assert_eq!(collector.results().total_trades, 100);
    }

    #[test]
    fn empty_collector_reports_nothing() {
        let collector = StatisticsCollector::new();
        assert!(collector.is_empty());
        assert!(collector.results().is_empty());
    }
}
