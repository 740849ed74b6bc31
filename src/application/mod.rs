//! Application services (use cases).
//!
//! These services compose domain rules into the backtest pipeline:
//! quote store, opportunity detection, per-instance ledgers, statistics,
//! and the orchestrator that runs them on a worker pool.

pub mod backtest;
pub mod detector;
pub mod ledger;
pub mod statistics;
pub mod store;

pub use backtest::{BacktestConfig, BacktestOutcome, Backtester, QuoteCount};
pub use detector::{DetectorConfig, OpportunityDetector};
pub use ledger::{simulate, SimulationInstance, SimulationSpec, EXECUTION_EPSILON};
pub use statistics::StatisticsCollector;
pub use store::{QuoteStore, SymbolPartition};
