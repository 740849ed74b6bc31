//! Simulation event sink port.
//!
//! Core services never touch process-wide logging state for per-trade
//! events. They receive a sink at construction and report through it.

use std::collections::BTreeMap;

use crate::domain::simulation::{InstanceKey, InstanceSummary, SkipReason};
use crate::domain::{ExchangeId, Opportunity, Symbol, TradeRecord, Wallet};

/// Receives events from detection and replay.
///
/// Every method has a no-op default so adapters only implement what they
/// render. Implementations must be cheap: `trade_executed` and
/// `opportunity_skipped` fire once per opportunity on worker threads.
pub trait SimulationSink: Send + Sync {
    /// Opportunity detection finished for one symbol.
    fn symbol_scanned(&self, _symbol: &Symbol, _exchanges: usize, _opportunities: usize) {}

    /// A ledger was funded and seeded.
    fn instance_funded(&self, _key: &InstanceKey, _wallets: &BTreeMap<ExchangeId, Wallet>) {}

    /// An exchange had no valid ask to seed base inventory from.
    fn seed_missing(&self, _key: &InstanceKey, _exchange: &ExchangeId) {}

    fn trade_executed(&self, _key: &InstanceKey, _trade: &TradeRecord) {}

    fn opportunity_skipped(
        &self,
        _key: &InstanceKey,
        _opportunity: &Opportunity,
        _reason: SkipReason,
    ) {
    }

    /// A (symbol, threshold) unit of work was scheduled.
    fn unit_started(&self, _key: &InstanceKey) {}

    /// A (symbol, threshold) unit of work finished replay.
    fn unit_finished(&self, _summary: &InstanceSummary) {}
}
