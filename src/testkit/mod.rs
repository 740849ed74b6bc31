//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: Builders for quotes, opportunities and timestamps.
//! - [`stream`]: Seeded random quote streams for property tests.
//! - [`sink`]: [`RecordingSink`](sink::RecordingSink), a simulation sink
//!   that keeps every event for later assertions.
//! - [`config`]: Canonical backtest configurations.

pub mod config;
pub mod domain;
pub mod sink;
pub mod stream;
