//! Commission models applied when pricing an opportunity.
//!
//! Historical versions of the analyzer disagreed on how many legs pay the
//! fee. The model is therefore explicit configuration rather than a constant.

use serde::{Deserialize, Serialize};

/// How commission is deducted from the gross spread of an opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionModel {
    /// Buy leg rests as a maker order (fee-free), sell leg pays the taker fee.
    /// Commission is subtracted once.
    #[default]
    MakerTaker,
    /// Both legs cross the book and both pay the taker fee.
    /// Commission is subtracted twice.
    TakerTaker,
}

impl CommissionModel {
    /// Number of legs charged by this model.
    #[must_use]
    pub const fn charged_legs(self) -> u32 {
        match self {
            Self::MakerTaker => 1,
            Self::TakerTaker => 2,
        }
    }

    /// Percentage points deducted from the gross spread.
    #[must_use]
    pub fn deduction(self, commission_pct: f64) -> f64 {
        commission_pct * f64::from(self.charged_legs())
    }

    /// Net profit percentage of buying at `buy_price` and selling at `sell_price`.
    #[must_use]
    pub fn net_profit_pct(self, buy_price: f64, sell_price: f64, commission_pct: f64) -> f64 {
        (sell_price - buy_price) / buy_price * 100.0 - self.deduction(commission_pct)
    }

    /// Stable lowercase name used in config files and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MakerTaker => "maker_taker",
            Self::TakerTaker => "taker_taker",
        }
    }
}

impl std::fmt::Display for CommissionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
