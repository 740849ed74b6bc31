//! Outbound adapters (driven side): sinks, exporters and report rendering.

pub mod export;
pub mod report;
pub mod sink;
