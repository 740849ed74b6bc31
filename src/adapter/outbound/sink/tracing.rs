//! Sink that reports simulation events through `tracing`.

use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use crate::domain::simulation::{InstanceKey, InstanceSummary, SkipReason};
use crate::domain::{ExchangeId, Opportunity, Symbol, TradeRecord, Wallet};
use crate::port::SimulationSink;

/// Structured log events for every stage of a backtest.
///
/// Per-opportunity events are emitted at `trace`/`debug` so they cost
/// nothing unless explicitly enabled. Instance summaries are `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SimulationSink for TracingSink {
    fn symbol_scanned(&self, symbol: &Symbol, exchanges: usize, opportunities: usize) {
        info!(
            symbol = %symbol,
            exchanges,
            opportunities,
            "Opportunities detected"
        );
    }

    fn instance_funded(&self, key: &InstanceKey, wallets: &BTreeMap<ExchangeId, Wallet>) {
        for (exchange, wallet) in wallets {
            debug!(
                symbol = %key.symbol,
                threshold = %key.threshold,
                exchange = %exchange,
                quote = wallet.quote_balance(),
                base = wallet.base_balance(),
                "Wallet funded"
            );
        }
    }

    fn seed_missing(&self, key: &InstanceKey, exchange: &ExchangeId) {
        warn!(
            symbol = %key.symbol,
            threshold = %key.threshold,
            exchange = %exchange,
            "No valid ask to seed base inventory, wallet starts in quote only"
        );
    }

    fn trade_executed(&self, key: &InstanceKey, trade: &TradeRecord) {
        trace!(
            symbol = %key.symbol,
            threshold = %key.threshold,
            buy_exchange = %trade.buy_exchange,
            sell_exchange = %trade.sell_exchange,
            amount = trade.amount_base,
            profit = trade.profit_quote_currency,
            "Trade executed"
        );
    }

    fn opportunity_skipped(
        &self,
        key: &InstanceKey,
        opportunity: &Opportunity,
        reason: SkipReason,
    ) {
        match reason {
            SkipReason::InsufficientBalance => trace!(
                symbol = %key.symbol,
                threshold = %key.threshold,
                buy_exchange = %opportunity.buy_exchange(),
                sell_exchange = %opportunity.sell_exchange(),
                "Opportunity skipped: insufficient balance"
            ),
            _ => debug!(
                symbol = %key.symbol,
                threshold = %key.threshold,
                buy_exchange = %opportunity.buy_exchange(),
                sell_exchange = %opportunity.sell_exchange(),
                reason = %reason,
                "Opportunity skipped"
            ),
        }
    }

    fn unit_finished(&self, summary: &InstanceSummary) {
        info!(
            symbol = %summary.key.symbol,
            threshold = %summary.key.threshold,
            considered = summary.opportunities_considered,
            trades = summary.trades_executed,
            "Simulation finished"
        );
    }
}
