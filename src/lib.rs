//! Arbscope - cross-exchange arbitrage detection and backtesting.
//!
//! Replays historical best bid/ask quotes from several exchanges, detects
//! moments where one exchange's bid exceeds another's by more than the
//! commission, and simulates trading those opportunities against isolated
//! per-exchange wallets for a sweep of minimum profit thresholds.
//!
//! # Architecture
//!
//! - [`domain`] - Quotes, opportunities, wallets, trade records and reports
//! - [`application`] - Quote store, detector, ledger simulation, statistics
//!   collector and the parallel backtest orchestrator
//! - [`port`] - Traits at the edges: quote sources, simulation event sinks
//!   and trade exporters
//! - [`adapter`] - JSON Lines quote reader, CLI, tracing sink, CSV/JSONL
//!   exporters and table rendering
//! - [`infrastructure`] - TOML configuration and logging setup
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use arbscope::adapter::inbound::source::JsonlQuoteSource;
//! use arbscope::adapter::outbound::sink::TracingSink;
//! use arbscope::application::{BacktestConfig, Backtester, QuoteStore};
//! use arbscope::domain::QuoteFilter;
//!
//! fn main() -> arbscope::error::Result<()> {
//!     let loaded = JsonlQuoteSource::new("data/market_data").scan(&QuoteFilter::default())?;
//!     let store = QuoteStore::from_quotes(loaded.quotes);
//!     let outcome =
//!         Backtester::new(BacktestConfig::default(), Arc::new(TracingSink)).run(&store)?;
//!     println!("{} trades", outcome.report.total_trades);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
