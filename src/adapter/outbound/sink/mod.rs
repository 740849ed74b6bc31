//! Simulation sink adapters.
//!
//! Implements [`SimulationSink`](crate::port::SimulationSink) for structured
//! logging and for runs that want no events at all.

mod tracing;

pub use self::tracing::TracingSink;

use crate::port::SimulationSink;

/// A no-op sink for benchmarks or when events are not wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SimulationSink for NullSink {}
