//! Cross-exchange opportunity detection.
//!
//! For every unordered pair of exchanges quoting a symbol, each quote on one
//! exchange is matched against the latest quote on the other exchange at or
//! before the same instant. The pair is scanned in both directions. A row
//! yields an opportunity when both bids are positive and the net profit
//! after commission is strictly positive.
//!
//! The buy leg is priced at the reference exchange's bid (a resting maker
//! order) and the sell leg at the driving exchange's bid (a taker order).

use rayon::prelude::*;
use tracing::debug;

use crate::application::store::SymbolPartition;
use crate::domain::{CommissionModel, ExchangeId, Opportunity, Quote, Symbol};

/// Detector settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DetectorConfig {
    /// Commission percentage per charged leg.
    pub commission_pct: f64,
    pub commission_model: CommissionModel,
}

/// Stateless detector producing opportunity streams for one symbol at a time.
#[derive(Debug, Clone, Copy)]
pub struct OpportunityDetector {
    config: DetectorConfig,
}

impl OpportunityDetector {
    pub const fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Every opportunity for the partition's symbol.
    ///
    /// Output is grouped by exchange pair in lexical pair order, and within
    /// a pair by direction. It is not globally sorted by time.
    #[must_use]
    pub fn detect(&self, partition: &SymbolPartition<'_>) -> Vec<Opportunity> {
        let symbol = partition.symbol();
        let exchanges: Vec<&ExchangeId> = partition.exchanges().collect();
        if exchanges.len() < 2 {
            debug!(
                symbol = %symbol,
                exchanges = exchanges.len(),
                "Fewer than two exchanges, no opportunities"
            );
            return Vec::new();
        }

        let mut pairs = Vec::with_capacity(exchanges.len() * (exchanges.len() - 1) / 2);
        for (i, left) in exchanges.iter().enumerate() {
            for right in &exchanges[i + 1..] {
                pairs.push((*left, *right));
            }
        }

        let streams: Vec<Vec<Opportunity>> = pairs
            .par_iter()
            .map(|&(left, right)| {
                let left_quotes = partition.stream(left);
                let right_quotes = partition.stream(right);
                let mut found =
                    self.detect_pair(symbol, (left, left_quotes), (right, right_quotes));
                found.extend(self.detect_pair(
                    symbol,
                    (right, right_quotes),
                    (left, left_quotes),
                ));
                found
            })
            .collect();

        let opportunities: Vec<Opportunity> = streams.into_iter().flatten().collect();
        debug!(
            symbol = %symbol,
            exchanges = exchanges.len(),
            pairs = pairs.len(),
            opportunities = opportunities.len(),
            "Detection complete"
        );
        opportunities
    }

    /// One direction of one exchange pair.
    ///
    /// Each `driver` quote is joined with the most recent `reference` quote at
    /// or before its timestamp. Opportunities buy on the reference exchange and
    /// sell on the driver exchange. Both slices must be sorted by timestamp.
    #[must_use]
    pub fn detect_pair(
        &self,
        symbol: &Symbol,
        driver: (&ExchangeId, &[Quote]),
        reference: (&ExchangeId, &[Quote]),
    ) -> Vec<Opportunity> {
        let (sell_exchange, driver_quotes) = driver;
        let (buy_exchange, reference_quotes) = reference;

        let mut found = Vec::new();
        let mut next = 0;
        for quote in driver_quotes {
            while next < reference_quotes.len()
                && reference_quotes[next].timestamp() <= quote.timestamp()
            {
                next += 1;
            }
            let Some(latest) = next.checked_sub(1).map(|i| &reference_quotes[i]) else {
                continue;
            };
            if !quote.has_bid() || !latest.has_bid() {
                continue;
            }

            let buy_price = latest.best_bid();
            let sell_price = quote.best_bid();
            let profit_pct = self.config.commission_model.net_profit_pct(
                buy_price,
                sell_price,
                self.config.commission_pct,
            );
            if profit_pct > 0.0 {
                found.push(Opportunity::new(
                    symbol.clone(),
                    quote.timestamp(),
                    buy_exchange.clone(),
                    buy_price,
                    sell_exchange.clone(),
                    sell_price,
                    profit_pct,
                ));
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::QuoteStore;
    use chrono::{TimeZone, Utc};

    fn quote(exchange: &str, ms: i64, bid: f64) -> Quote {
        Quote::try_new(
            exchange,
            "BTCUSDT",
            Utc.timestamp_millis_opt(ms).unwrap(),
            bid,
            bid + 1.0,
        )
        .unwrap()
    }

    fn detector(commission_pct: f64) -> OpportunityDetector {
        OpportunityDetector::new(DetectorConfig {
            commission_pct,
            commission_model: CommissionModel::MakerTaker,
        })
    }

    #[test]
    fn single_exchange_yields_nothing() {
        let store = QuoteStore::from_quotes([quote("A", 0, 100.0), quote("A", 1, 120.0)]);
        let partition = store.partition(&Symbol::from("BTCUSDT")).unwrap();
        assert!(detector(0.0).detect(&partition).is_empty());
    }

    #[test]
    fn join_never_looks_forward() {
        let symbol = Symbol::from("BTCUSDT");
        let a = ExchangeId::from("A");
        let b = ExchangeId::from("B");
        let driver = [quote("A", 0, 110.0)];
        let reference = [quote("B", 1, 100.0)];
        let found = detector(0.0).detect_pair(&symbol, (&a, &driver), (&b, &reference));
        assert!(found.is_empty());
    }

    #[test]
    fn join_uses_latest_reference_at_or_before() {
        let symbol = Symbol::from("BTCUSDT");
        let a = ExchangeId::from("A");
        let b = ExchangeId::from("B");
        let driver = [quote("A", 5, 110.0)];
        let reference = [quote("B", 1, 90.0), quote("B", 5, 100.0), quote("B", 6, 50.0)];
        let found = detector(0.0).detect_pair(&symbol, (&a, &driver), (&b, &reference));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].buy_price(), 100.0);
        assert_eq!(found[0].buy_exchange().as_str(), "B");
        assert_eq!(found[0].sell_exchange().as_str(), "A");
        assert!((found[0].profit_pct() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_reference_bid_is_not_skipped_over() {
        let symbol = Symbol::from("BTCUSDT");
        let a = ExchangeId::from("A");
        let b = ExchangeId::from("B");
        let driver = [quote("A", 5, 110.0)];
        let reference = [quote("B", 1, 90.0), quote("B", 2, 0.0)];
        let found = detector(0.0).detect_pair(&symbol, (&a, &driver), (&b, &reference));
        assert!(found.is_empty());
    }

    #[test]
    fn commission_can_erase_spread() {
        let symbol = Symbol::from("BTCUSDT");
        let a = ExchangeId::from("A");
        let b = ExchangeId::from("B");
        let driver = [quote("A", 0, 100.1)];
        let reference = [quote("B", 0, 100.0)];
        assert_eq!(
            detector(0.0)
                .detect_pair(&symbol, (&a, &driver), (&b, &reference))
                .len(),
            1
        );
        assert!(detector(0.2)
            .detect_pair(&symbol, (&a, &driver), (&b, &reference))
            .is_empty());
    }

    #[test]
    fn taker_taker_subtracts_commission_twice() {
        let symbol = Symbol::from("BTCUSDT");
        let a = ExchangeId::from("A");
        let b = ExchangeId::from("B");
        let driver = [quote("A", 0, 101.0)];
        let reference = [quote("B", 0, 100.0)];
        let taker = OpportunityDetector::new(DetectorConfig {
            commission_pct: 0.2,
            commission_model: CommissionModel::TakerTaker,
        });
        let found = taker.detect_pair(&symbol, (&a, &driver), (&b, &reference));
        assert!((found[0].profit_pct() - 0.6).abs() < 1e-9);
    }
}
