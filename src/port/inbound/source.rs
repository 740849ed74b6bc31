//! Quote source port.

use crate::domain::filter::QuoteFilter;
use crate::domain::Quote;
use crate::error::Result;

/// Loads historical quotes for the quote store.
///
/// Sources are responsible for cleaning their input. Malformed or empty
/// partitions are dropped here so the core can assume clean quotes.
pub trait QuoteSource {
    /// Load every quote accepted by `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data cannot be read at all.
    fn load(&self, filter: &QuoteFilter) -> Result<Vec<Quote>>;
}
