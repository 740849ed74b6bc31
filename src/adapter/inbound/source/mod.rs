//! Quote source adapters.

mod jsonl;

pub use jsonl::{JsonlQuoteSource, LoadReport};
