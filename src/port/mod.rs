//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌─────────────┐      ┌───────────────────────┐      ┌──────────────┐
//!   │ QuoteSource │ ───▶ │ store → detector →    │ ───▶ │ Simulation   │
//!   │  (JSONL)    │      │ ledger → statistics   │      │ Sink/Export  │
//!   └─────────────┘      └───────────────────────┘      └──────────────┘
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::source::QuoteSource;
pub use outbound::export::TradeExporter;
pub use outbound::sink::SimulationSink;
