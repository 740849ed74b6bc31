//! Progress reporting for long backtests.

use std::collections::BTreeMap;

use indicatif::ProgressBar;

use crate::adapter::outbound::sink::TracingSink;
use crate::domain::simulation::{InstanceKey, InstanceSummary, SkipReason};
use crate::domain::{ExchangeId, Opportunity, Symbol, TradeRecord, Wallet};
use crate::port::SimulationSink;

/// Forwards every event to [`TracingSink`] and advances a bar per finished
/// (symbol, threshold) unit.
pub struct ProgressSink {
    log: TracingSink,
    bar: ProgressBar,
}

impl ProgressSink {
    pub fn new(bar: ProgressBar) -> Self {
        Self {
            log: TracingSink,
            bar,
        }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl SimulationSink for ProgressSink {
    fn symbol_scanned(&self, symbol: &Symbol, exchanges: usize, opportunities: usize) {
        self.log.symbol_scanned(symbol, exchanges, opportunities);
    }

    fn instance_funded(&self, key: &InstanceKey, wallets: &BTreeMap<ExchangeId, Wallet>) {
        self.log.instance_funded(key, wallets);
    }

    fn seed_missing(&self, key: &InstanceKey, exchange: &ExchangeId) {
        self.log.seed_missing(key, exchange);
    }

    fn trade_executed(&self, key: &InstanceKey, trade: &TradeRecord) {
        self.log.trade_executed(key, trade);
    }

    fn opportunity_skipped(
        &self,
        key: &InstanceKey,
        opportunity: &Opportunity,
        reason: SkipReason,
    ) {
        self.log.opportunity_skipped(key, opportunity, reason);
    }

    fn unit_started(&self, key: &InstanceKey) {
        self.log.unit_started(key);
    }

    fn unit_finished(&self, summary: &InstanceSummary) {
        self.log.unit_finished(summary);
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeesPaid;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bar_advances_per_finished_unit() {
        let sink = ProgressSink::new(ProgressBar::hidden());
        let summary = InstanceSummary {
            key: InstanceKey::new(Symbol::from("BTCUSDT"), dec!(0.1)),
            opportunities_considered: 0,
            trades_executed: 0,
            opportunities_skipped: 0,
            quote_balance: 0.0,
            base_balance: 0.0,
            fees: FeesPaid::default(),
        };
        sink.unit_started(&summary.key);
        sink.unit_finished(&summary);
        sink.unit_finished(&summary);
        assert_eq!(sink.bar().position(), 2);
    }
}
