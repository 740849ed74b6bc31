//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe where simulation events and executed trades go.

pub mod export;
pub mod sink;
