//! Recording simulation sink.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::domain::simulation::{InstanceKey, InstanceSummary, SkipReason};
use crate::domain::{ExchangeId, Opportunity, Symbol, TradeRecord, Wallet};
use crate::port::SimulationSink;

/// Keeps every event it receives. Safe to share across worker threads.
#[derive(Debug, Default)]
pub struct RecordingSink {
    scanned: Mutex<Vec<(Symbol, usize, usize)>>,
    funded: Mutex<Vec<(InstanceKey, BTreeMap<ExchangeId, Wallet>)>>,
    seed_missing: Mutex<Vec<(InstanceKey, ExchangeId)>>,
    trades: Mutex<Vec<TradeRecord>>,
    skipped: Mutex<Vec<SkipReason>>,
    started: Mutex<Vec<InstanceKey>>,
    finished: Mutex<Vec<InstanceSummary>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(symbol, exchanges, opportunities)` per scanned symbol.
    pub fn scanned(&self) -> Vec<(Symbol, usize, usize)> {
        self.scanned.lock().clone()
    }

    pub fn funded(&self) -> Vec<(InstanceKey, BTreeMap<ExchangeId, Wallet>)> {
        self.funded.lock().clone()
    }

    pub fn seed_missing_count(&self) -> usize {
        self.seed_missing.lock().len()
    }

    pub fn trades(&self) -> Vec<TradeRecord> {
        self.trades.lock().clone()
    }

    pub fn skipped(&self) -> Vec<SkipReason> {
        self.skipped.lock().clone()
    }

    pub fn started(&self) -> usize {
        self.started.lock().len()
    }

    pub fn finished(&self) -> Vec<InstanceSummary> {
        self.finished.lock().clone()
    }
}

impl SimulationSink for RecordingSink {
    fn symbol_scanned(&self, symbol: &Symbol, exchanges: usize, opportunities: usize) {
        self.scanned
            .lock()
            .push((symbol.clone(), exchanges, opportunities));
    }

    fn instance_funded(&self, key: &InstanceKey, wallets: &BTreeMap<ExchangeId, Wallet>) {
        self.funded.lock().push((key.clone(), wallets.clone()));
    }

    fn seed_missing(&self, key: &InstanceKey, exchange: &ExchangeId) {
        self.seed_missing
            .lock()
            .push((key.clone(), exchange.clone()));
    }

    fn trade_executed(&self, _key: &InstanceKey, trade: &TradeRecord) {
        self.trades.lock().push(trade.clone());
    }

    fn opportunity_skipped(
        &self,
        _key: &InstanceKey,
        _opportunity: &Opportunity,
        reason: SkipReason,
    ) {
        self.skipped.lock().push(reason);
    }

    fn unit_started(&self, key: &InstanceKey) {
        self.started.lock().push(key.clone());
    }

    fn unit_finished(&self, summary: &InstanceSummary) {
        self.finished.lock().push(summary.clone());
    }
}
