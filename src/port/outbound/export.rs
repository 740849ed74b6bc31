//! Trade export port.

use crate::domain::TradeRecord;
use crate::error::Result;

/// Persists executed trades as flat rows, one per trade.
pub trait TradeExporter {
    /// Write every trade and return the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn export(&self, trades: &[TradeRecord]) -> Result<usize>;
}
