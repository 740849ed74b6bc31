//! Per-instance balance simulation.
//!
//! A simulation instance owns one [`Wallet`] per exchange for a single
//! (symbol, profit threshold) pair. Instances are built from a
//! [`SimulationSpec`] by [`SimulationInstance::fund`], replayed once against
//! an opportunity stream, and are read-only afterwards.
//!
//! ```text
//! SimulationSpec ──fund──▶ SimulationInstance<Funded> ──replay──▶ SimulationInstance<Finalized>
//! ```

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::simulation::{FeesPaid, InstanceKey, InstanceSummary, SkipReason};
use crate::domain::{DomainError, ExchangeId, Opportunity, Symbol, TradeRecord, Wallet};
use crate::port::SimulationSink;

/// Fills smaller than this many base units are skipped.
pub const EXECUTION_EPSILON: f64 = 1e-9;

pub const DEFAULT_INITIAL_QUOTE_BALANCE: f64 = 1000.0;
pub const DEFAULT_SWAP_RATIO: f64 = 0.5;
pub const DEFAULT_COMMISSION_PCT: f64 = 0.02;
pub const DEFAULT_QUOTE_CURRENCY: &str = "USDT";

/// Everything needed to construct one simulation instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSpec {
    pub symbol: Symbol,
    pub threshold: Decimal,
    pub exchanges: Vec<ExchangeId>,
    /// Quote currency allocated to every exchange wallet.
    pub initial_quote_balance: f64,
    /// Fraction of the initial balance swapped into base at the seed price.
    pub swap_ratio: f64,
    pub commission_pct: f64,
    pub quote_currency: String,
    /// First valid ask per exchange, used to seed base inventory.
    pub seed_prices: BTreeMap<ExchangeId, f64>,
}

impl SimulationSpec {
    /// Spec with default balances, commission and quote currency.
    pub fn new(symbol: Symbol, threshold: Decimal, exchanges: Vec<ExchangeId>) -> Self {
        Self {
            symbol,
            threshold,
            exchanges,
            initial_quote_balance: DEFAULT_INITIAL_QUOTE_BALANCE,
            swap_ratio: DEFAULT_SWAP_RATIO,
            commission_pct: DEFAULT_COMMISSION_PCT,
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            seed_prices: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_seed_prices(mut self, seed_prices: BTreeMap<ExchangeId, f64>) -> Self {
        self.seed_prices = seed_prices;
        self
    }

    #[must_use]
    pub fn with_commission(mut self, commission_pct: f64) -> Self {
        self.commission_pct = commission_pct;
        self
    }

    #[must_use]
    pub fn with_initial_quote_balance(mut self, balance: f64) -> Self {
        self.initial_quote_balance = balance;
        self
    }

    #[must_use]
    pub fn with_swap_ratio(mut self, swap_ratio: f64) -> Self {
        self.swap_ratio = swap_ratio;
        self
    }

    #[must_use]
    pub fn key(&self) -> InstanceKey {
        InstanceKey::new(self.symbol.clone(), self.threshold)
    }

    /// Check every construction-time invariant.
    ///
    /// Returns the threshold as `f64` and the `(base, quote)` currencies.
    fn validate(&self) -> Result<(f64, String, String), DomainError> {
        if self.exchanges.is_empty() {
            return Err(DomainError::NoExchanges);
        }
        if !self.commission_pct.is_finite() || !(0.0..100.0).contains(&self.commission_pct) {
            return Err(DomainError::InvalidCommission {
                value: self.commission_pct,
            });
        }
        if !self.initial_quote_balance.is_finite() || self.initial_quote_balance <= 0.0 {
            return Err(DomainError::InvalidBalance {
                value: self.initial_quote_balance,
            });
        }
        if !(0.0..=1.0).contains(&self.swap_ratio) {
            return Err(DomainError::InvalidSwapRatio {
                value: self.swap_ratio,
            });
        }
        let threshold = match self.threshold.to_f64() {
            Some(value) if value >= 0.0 => value,
            _ => {
                return Err(DomainError::InvalidThreshold {
                    value: self.threshold,
                })
            }
        };
        let (base, quote) = self.symbol.split(&self.quote_currency)?;
        Ok((threshold, base, quote))
    }
}

/// Marker for an instance that has balances but has not replayed.
#[derive(Debug, Clone, Copy)]
pub struct Funded;

/// Marker for a replayed, read-only instance.
#[derive(Debug, Clone)]
pub struct Finalized {
    trades: Vec<TradeRecord>,
    considered: usize,
    skipped: usize,
}

/// One isolated (symbol, threshold) ledger.
#[derive(Debug, Clone)]
pub struct SimulationInstance<S> {
    key: InstanceKey,
    threshold_pct: f64,
    commission_pct: f64,
    base_currency: String,
    quote_currency: String,
    wallets: BTreeMap<ExchangeId, Wallet>,
    fees: FeesPaid,
    state: S,
}

impl<S> SimulationInstance<S> {
    pub fn key(&self) -> &InstanceKey {
        &self.key
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }

    pub fn wallets(&self) -> &BTreeMap<ExchangeId, Wallet> {
        &self.wallets
    }

    pub fn wallet(&self, exchange: &ExchangeId) -> Option<&Wallet> {
        self.wallets.get(exchange)
    }

    pub fn fees(&self) -> FeesPaid {
        self.fees
    }

    pub fn total_quote(&self) -> f64 {
        self.wallets.values().map(Wallet::quote_balance).sum()
    }

    pub fn total_base(&self) -> f64 {
        self.wallets.values().map(Wallet::base_balance).sum()
    }

    /// Combined value of every wallet, marking base at `price`.
    pub fn value_at(&self, price: f64) -> f64 {
        self.wallets.values().map(|w| w.value_at(price)).sum()
    }
}

impl SimulationInstance<Funded> {
    /// Validate `spec`, allocate wallets and seed base inventory.
    ///
    /// Each exchange starts with `initial_quote_balance` of quote currency.
    /// When `swap_ratio` is positive, that fraction is swapped into base at
    /// the exchange's seed price. Exchanges without a seed price stay all
    /// quote and are reported through [`SimulationSink::seed_missing`].
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the spec violates an invariant. No
    /// wallet is created in that case.
    pub fn fund(spec: &SimulationSpec, sink: &dyn SimulationSink) -> Result<Self, DomainError> {
        let key = spec.key();
        let mut wallets = BTreeMap::new();
        for exchange in &spec.exchanges {
            let mut wallet = Wallet::new(spec.initial_quote_balance, 0.0);
            if spec.swap_ratio > 0.0 {
                match spec.seed_prices.get(exchange) {
                    Some(&price) if price > 0.0 => {
                        wallet.swap_into_base(spec.initial_quote_balance * spec.swap_ratio, price);
                    }
                    _ => sink.seed_missing(&key, exchange),
                }
            }
            wallets.insert(exchange.clone(), wallet);
        }
        let instance = Self::from_wallets(spec, wallets)?;
        sink.instance_funded(&instance.key, &instance.wallets);
        Ok(instance)
    }

    /// Build an instance from explicit wallets, skipping seeding.
    ///
    /// The spec is still validated; its exchange list is ignored in favour of
    /// the wallet keys.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] when the spec violates an invariant or
    /// `wallets` is empty.
    pub fn from_wallets(
        spec: &SimulationSpec,
        wallets: BTreeMap<ExchangeId, Wallet>,
    ) -> Result<Self, DomainError> {
        let (threshold_pct, base_currency, quote_currency) = spec.validate()?;
        if wallets.is_empty() {
            return Err(DomainError::NoExchanges);
        }
        Ok(Self {
            key: spec.key(),
            threshold_pct,
            commission_pct: spec.commission_pct,
            base_currency,
            quote_currency,
            wallets,
            fees: FeesPaid::default(),
            state: Funded,
        })
    }

    /// Replay `opportunities` in time order and finalize the instance.
    ///
    /// Only opportunities with `profit_pct >= threshold` are considered. They
    /// are stable-sorted by timestamp, so equal timestamps keep input order.
    pub fn replay(
        mut self,
        opportunities: &[Opportunity],
        sink: &dyn SimulationSink,
    ) -> SimulationInstance<Finalized> {
        let mut eligible: Vec<&Opportunity> = opportunities
            .iter()
            .filter(|o| o.profit_pct() >= self.threshold_pct)
            .collect();
        eligible.sort_by_key(|o| o.timestamp());

        let mut trades = Vec::new();
        let mut skipped = 0;
        for opportunity in &eligible {
            match self.fill(opportunity) {
                Ok(trade) => {
                    sink.trade_executed(&self.key, &trade);
                    trades.push(trade);
                }
                Err(reason) => {
                    skipped += 1;
                    sink.opportunity_skipped(&self.key, opportunity, reason);
                }
            }
        }

        SimulationInstance {
            key: self.key,
            threshold_pct: self.threshold_pct,
            commission_pct: self.commission_pct,
            base_currency: self.base_currency,
            quote_currency: self.quote_currency,
            wallets: self.wallets,
            fees: self.fees,
            state: Finalized {
                trades,
                considered: eligible.len(),
                skipped,
            },
        }
    }

    /// Execute one opportunity against the wallets, capped by balances.
    fn fill(&mut self, opportunity: &Opportunity) -> Result<TradeRecord, SkipReason> {
        let buy_exchange = opportunity.buy_exchange();
        let sell_exchange = opportunity.sell_exchange();
        let buy_price = opportunity.buy_price();
        let sell_price = opportunity.sell_price();

        if buy_exchange == sell_exchange {
            return Err(SkipReason::SameExchange);
        }
        if !(buy_price > 0.0 && buy_price.is_finite() && sell_price.is_finite()) {
            return Err(SkipReason::InvalidPrice);
        }
        let (Some(buy_wallet), Some(sell_wallet)) = (
            self.wallets.get(buy_exchange),
            self.wallets.get(sell_exchange),
        ) else {
            return Err(SkipReason::UnknownExchange);
        };

        let amount = buy_wallet
            .max_buy(buy_price)
            .min(sell_wallet.base_balance());
        if amount < EXECUTION_EPSILON {
            return Err(SkipReason::InsufficientBalance);
        }

        let rate = self.commission_pct / 100.0;
        let received_base = amount * (1.0 - rate);
        let proceeds = amount * sell_price;
        let received_quote = proceeds * (1.0 - rate);

        if let Some(wallet) = self.wallets.get_mut(buy_exchange) {
            wallet.debit_quote(amount * buy_price);
            wallet.credit_base(received_base);
        }
        if let Some(wallet) = self.wallets.get_mut(sell_exchange) {
            wallet.debit_base(amount);
            wallet.credit_quote(received_quote);
        }
        self.fees.base += amount - received_base;
        self.fees.quote += proceeds - received_quote;

        Ok(TradeRecord::new(
            self.key.threshold,
            self.key.symbol.clone(),
            opportunity.timestamp(),
            (buy_exchange.clone(), buy_price),
            (sell_exchange.clone(), sell_price),
            opportunity.profit_pct(),
            amount,
        ))
    }
}

impl SimulationInstance<Finalized> {
    pub fn trades(&self) -> &[TradeRecord] {
        &self.state.trades
    }

    pub fn into_trades(self) -> Vec<TradeRecord> {
        self.state.trades
    }

    /// Opportunities at or above the threshold.
    pub fn considered(&self) -> usize {
        self.state.considered
    }

    pub fn skipped(&self) -> usize {
        self.state.skipped
    }

    #[must_use]
    pub fn summary(&self) -> InstanceSummary {
        InstanceSummary {
            key: self.key.clone(),
            opportunities_considered: self.state.considered,
            trades_executed: self.state.trades.len(),
            opportunities_skipped: self.state.skipped,
            quote_balance: self.total_quote(),
            base_balance: self.total_base(),
            fees: self.fees,
        }
    }
}

/// Fund, replay and return the trade log of one instance.
///
/// # Errors
///
/// Returns a [`DomainError`] when the spec violates an invariant.
pub fn simulate(
    spec: &SimulationSpec,
    opportunities: &[Opportunity],
    sink: &dyn SimulationSink,
) -> Result<Vec<TradeRecord>, DomainError> {
    Ok(SimulationInstance::fund(spec, sink)?
        .replay(opportunities, sink)
        .into_trades())
}
