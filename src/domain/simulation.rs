//! Identity and bookkeeping types for simulation instances.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::ids::Symbol;

/// Identifies one isolated (symbol, profit threshold) simulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InstanceKey {
    pub symbol: Symbol,
    pub threshold: Decimal,
}

impl InstanceKey {
    pub fn new(symbol: Symbol, threshold: Decimal) -> Self {
        Self { symbol, threshold }
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}%", self.symbol, self.threshold)
    }
}

/// Why an opportunity was not filled during replay.
///
/// None of these are errors; they are the expected outcomes of replaying a
/// dense opportunity stream against finite balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fillable size was below the execution epsilon.
    InsufficientBalance,
    /// One of the legs names an exchange without a wallet.
    UnknownExchange,
    /// Buy and sell legs are on the same exchange.
    SameExchange,
    /// Buy price is not strictly positive.
    InvalidPrice,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InsufficientBalance => "insufficient balance",
            Self::UnknownExchange => "unknown exchange",
            Self::SameExchange => "same exchange",
            Self::InvalidPrice => "invalid price",
        };
        f.write_str(label)
    }
}

/// Commission paid by one ledger, split by the currency it was charged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FeesPaid {
    /// Charged on the buy leg, in base currency.
    pub base: f64,
    /// Charged on the sell leg, in quote currency.
    pub quote: f64,
}

impl FeesPaid {
    /// Fees valued in quote currency, marking base at `price`.
    #[must_use]
    pub fn value_at(&self, price: f64) -> f64 {
        self.quote + self.base * price
    }
}

/// Read-only summary of a finished simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceSummary {
    pub key: InstanceKey,
    /// Opportunities at or above the threshold.
    pub opportunities_considered: usize,
    pub trades_executed: usize,
    pub opportunities_skipped: usize,
    /// Sum of quote balances across exchanges after replay.
    pub quote_balance: f64,
    /// Sum of base balances across exchanges after replay.
    pub base_balance: f64,
    pub fees: FeesPaid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn instance_key_display() {
        let key = InstanceKey::new(Symbol::from("BTCUSDT"), dec!(0.25));
        assert_eq!(key.to_string(), "BTCUSDT @ 0.25%");
    }

    #[test]
    fn fees_value_marks_base() {
        let fees = FeesPaid {
            base: 0.01,
            quote: 2.0,
        };
        assert!((fees.value_at(100.0) - 3.0).abs() < 1e-12);
    }
}
