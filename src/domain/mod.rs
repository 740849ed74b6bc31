//! Exchange-agnostic domain types and rules.

pub mod commission;
pub mod error;
pub mod filter;
pub mod ids;
pub mod opportunity;
pub mod quote;
pub mod simulation;
pub mod stats;
pub mod trade;
pub mod wallet;

pub use commission::CommissionModel;
pub use error::DomainError;
pub use filter::QuoteFilter;
pub use ids::{ExchangeId, Symbol};
pub use opportunity::Opportunity;
pub use quote::Quote;
pub use simulation::{FeesPaid, InstanceKey, InstanceSummary, SkipReason};
pub use stats::{AggregateReport, ExchangePair, SymbolStats, ThresholdStats};
pub use trade::TradeRecord;
pub use wallet::Wallet;
