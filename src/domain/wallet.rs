//! Per-exchange wallet holding one symbol's quote and base currency.

use serde::Serialize;

/// Balances held on a single exchange for a single symbol.
///
/// Each simulated symbol trades exactly one base currency against one quote
/// currency, so the wallet is a fixed pair of balances instead of a map keyed
/// by currency code. Balances never go negative: debits saturate at zero,
/// which absorbs floating-point dust left by capped trades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Wallet {
    quote_balance: f64,
    base_balance: f64,
}

impl Wallet {
    #[must_use]
    pub const fn new(quote_balance: f64, base_balance: f64) -> Self {
        Self {
            quote_balance,
            base_balance,
        }
    }

    pub fn quote_balance(&self) -> f64 {
        self.quote_balance
    }

    pub fn base_balance(&self) -> f64 {
        self.base_balance
    }

    /// Largest base amount the quote balance can buy at `price`.
    #[must_use]
    pub fn max_buy(&self, price: f64) -> f64 {
        if price > 0.0 {
            self.quote_balance / price
        } else {
            0.0
        }
    }

    pub fn debit_quote(&mut self, amount: f64) {
        self.quote_balance = (self.quote_balance - amount).max(0.0);
    }

    pub fn credit_quote(&mut self, amount: f64) {
        self.quote_balance += amount;
    }

    pub fn debit_base(&mut self, amount: f64) {
        self.base_balance = (self.base_balance - amount).max(0.0);
    }

    pub fn credit_base(&mut self, amount: f64) {
        self.base_balance += amount;
    }

    /// Convert `quote_amount` of quote currency into base at `price`, fee-free.
    ///
    /// Used once per wallet to seed inventory before replay. Returns the base
    /// amount acquired.
    pub fn swap_into_base(&mut self, quote_amount: f64, price: f64) -> f64 {
        if price <= 0.0 || quote_amount <= 0.0 {
            return 0.0;
        }
        let spend = quote_amount.min(self.quote_balance);
        let acquired = spend / price;
        self.debit_quote(spend);
        self.credit_base(acquired);
        acquired
    }

    /// Total value expressed in quote currency, marking base at `price`.
    #[must_use]
    pub fn value_at(&self, price: f64) -> f64 {
        self.quote_balance + self.base_balance * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debits_saturate_at_zero() {
        let mut wallet = Wallet::new(10.0, 1.0);
        wallet.debit_quote(10.000_000_000_001);
        wallet.debit_base(2.0);
        assert_eq!(wallet.quote_balance(), 0.0);
        assert_eq!(wallet.base_balance(), 0.0);
    }

    #[test]
    fn max_buy_divides_by_price() {
        let wallet = Wallet::new(100.0, 0.0);
        assert_eq!(wallet.max_buy(10.0), 10.0);
        assert_eq!(wallet.max_buy(0.0), 0.0);
    }

    #[test]
    fn swap_into_base_moves_value() {
        let mut wallet = Wallet::new(1000.0, 0.0);
        let acquired = wallet.swap_into_base(500.0, 250.0);
        assert_eq!(acquired, 2.0);
        assert_eq!(wallet.quote_balance(), 500.0);
        assert_eq!(wallet.base_balance(), 2.0);
        assert_eq!(wallet.value_at(250.0), 1000.0);
    }

    #[test]
    fn swap_into_base_ignores_invalid_price() {
        let mut wallet = Wallet::new(1000.0, 0.0);
        assert_eq!(wallet.swap_into_base(500.0, 0.0), 0.0);
        assert_eq!(wallet, Wallet::new(1000.0, 0.0));
    }
}
