//! Backtest orchestration.
//!
//! Every (symbol, threshold) pair is an independent unit of work. Detection
//! runs once per symbol and its opportunity list is shared read-only by all
//! of that symbol's thresholds. Units run on a dedicated rayon pool, each
//! owning its wallets. The statistics collector is the only shared mutable
//! state and receives one batch per unit.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::detector::{DetectorConfig, OpportunityDetector};
use crate::application::ledger::{
    SimulationInstance, SimulationSpec, DEFAULT_COMMISSION_PCT, DEFAULT_INITIAL_QUOTE_BALANCE,
    DEFAULT_QUOTE_CURRENCY, DEFAULT_SWAP_RATIO,
};
use crate::application::statistics::StatisticsCollector;
use crate::application::store::{QuoteStore, SymbolPartition};
use crate::domain::simulation::{InstanceKey, InstanceSummary};
use crate::domain::{
    AggregateReport, CommissionModel, DomainError, ExchangeId, Opportunity, Symbol, TradeRecord,
};
use crate::error::{ConfigError, Result};
use crate::port::SimulationSink;

/// Thresholds swept when none are configured.
pub fn default_thresholds() -> Vec<Decimal> {
    [10, 25, 30, 35, 40, 50]
        .into_iter()
        .map(|n| Decimal::new(n, 2))
        .collect()
}

/// Settings shared by every simulation instance of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub commission_pct: f64,
    pub commission_model: CommissionModel,
    pub profit_thresholds: Vec<Decimal>,
    pub initial_quote_balance: f64,
    pub swap_ratio: f64,
    pub quote_currency: String,
    /// Worker threads; `None` uses one per CPU.
    pub workers: Option<usize>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            commission_pct: DEFAULT_COMMISSION_PCT,
            commission_model: CommissionModel::default(),
            profit_thresholds: default_thresholds(),
            initial_quote_balance: DEFAULT_INITIAL_QUOTE_BALANCE,
            swap_ratio: DEFAULT_SWAP_RATIO,
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            workers: None,
        }
    }
}

impl BacktestConfig {
    /// Check run-wide settings before any work starts.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty threshold list, zero workers, or any
    /// value a simulation instance would refuse.
    pub fn validate(&self) -> Result<()> {
        if self.profit_thresholds.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "profit_thresholds",
                reason: "must contain at least one threshold".into(),
            }
            .into());
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "workers",
                reason: "must be greater than 0".into(),
            }
            .into());
        }
        if self.quote_currency.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "quote_currency",
            }
            .into());
        }
        if let Some(threshold) = self.profit_thresholds.iter().find(|t| t.is_sign_negative()) {
            return Err(DomainError::InvalidThreshold { value: *threshold }.into());
        }
        if !self.commission_pct.is_finite() || !(0.0..100.0).contains(&self.commission_pct) {
            return Err(DomainError::InvalidCommission {
                value: self.commission_pct,
            }
            .into());
        }
        if !self.initial_quote_balance.is_finite() || self.initial_quote_balance <= 0.0 {
            return Err(DomainError::InvalidBalance {
                value: self.initial_quote_balance,
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.swap_ratio) {
            return Err(DomainError::InvalidSwapRatio {
                value: self.swap_ratio,
            }
            .into());
        }
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            commission_pct: self.commission_pct,
            commission_model: self.commission_model,
        }
    }

    fn spec_for(&self, partition: &SymbolPartition<'_>, threshold: Decimal) -> SimulationSpec {
        SimulationSpec {
            symbol: partition.symbol().clone(),
            threshold,
            exchanges: partition.exchanges().cloned().collect(),
            initial_quote_balance: self.initial_quote_balance,
            swap_ratio: self.swap_ratio,
            commission_pct: self.commission_pct,
            quote_currency: self.quote_currency.clone(),
            seed_prices: partition.seed_prices(),
        }
    }
}

/// Number of quotes loaded for one (symbol, exchange) stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteCount {
    pub symbol: Symbol,
    pub exchange: ExchangeId,
    pub quotes: usize,
}

/// Result of a finished backtest.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub quotes: usize,
    /// Per-stream quote counts in (symbol, exchange) order.
    pub quote_counts: Vec<QuoteCount>,
    pub opportunities: usize,
    pub report: AggregateReport,
    /// Every executed trade in canonical order.
    #[serde(skip)]
    pub trades: Vec<TradeRecord>,
    /// One summary per (symbol, threshold), ordered by key.
    pub instances: Vec<InstanceSummary>,
}

/// One unit of work: a symbol's shared opportunities and one threshold.
struct Unit<'a> {
    partition: SymbolPartition<'a>,
    opportunities: Arc<[Opportunity]>,
    threshold: Decimal,
}

/// Runs every (symbol, threshold) simulation over a quote store.
pub struct Backtester {
    config: BacktestConfig,
    sink: Arc<dyn SimulationSink>,
}

impl Backtester {
    pub fn new(config: BacktestConfig, sink: Arc<dyn SimulationSink>) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Detect, replay and aggregate.
    ///
    /// # Errors
    ///
    /// Fails before any replay when the configuration is invalid, a symbol
    /// is not quoted in the configured quote currency, or the worker pool
    /// cannot be built.
    pub fn run(&self, store: &QuoteStore) -> Result<BacktestOutcome> {
        self.config.validate()?;
        for symbol in store.symbols() {
            symbol.split(&self.config.quote_currency)?;
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let workers = self.config.worker_count();
        info!(
            run_id = %run_id,
            symbols = store.symbols().count(),
            thresholds = self.config.profit_thresholds.len(),
            quotes = store.len(),
            workers,
            "Backtest starting"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        let detector = OpportunityDetector::new(self.config.detector_config());
        let sink = self.sink.as_ref();

        let (units, opportunities) = pool.install(|| self.detect_all(&detector, store));

        let collector = StatisticsCollector::new();
        let finished: Vec<InstanceSummary> = pool.install(|| {
            units
                .par_iter()
                .map(|unit| -> Result<InstanceSummary> {
                    let spec = self.config.spec_for(&unit.partition, unit.threshold);
                    sink.unit_started(&spec.key());
                    let instance = SimulationInstance::fund(&spec, sink)?
                        .replay(&unit.opportunities, sink);
                    let summary = instance.summary();
                    debug!(
                        instance = %summary.key,
                        considered = summary.opportunities_considered,
                        trades = summary.trades_executed,
                        "Instance finalized"
                    );
                    sink.unit_finished(&summary);
                    collector.extend(instance.into_trades());
                    Ok(summary)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut instances = finished;
        instances.sort_by(|a, b| a.key.cmp(&b.key));
        let report = collector.results();
        let trades = collector.trades();
        info!(
            run_id = %run_id,
            trades = report.total_trades,
            profit = report.total_profit,
            "Backtest finished"
        );

        Ok(BacktestOutcome {
            run_id,
            started_at,
            finished_at: Utc::now(),
            quotes: store.len(),
            quote_counts: store
                .counts()
                .into_iter()
                .map(|((symbol, exchange), quotes)| QuoteCount {
                    symbol,
                    exchange,
                    quotes,
                })
                .collect(),
            opportunities,
            report,
            trades,
            instances,
        })
    }

    /// Detect every symbol once and fan out one unit per threshold.
    ///
    /// Also returns the number of opportunities detected across symbols.
    fn detect_all<'a>(
        &self,
        detector: &OpportunityDetector,
        store: &'a QuoteStore,
    ) -> (Vec<Unit<'a>>, usize) {
        let partitions: Vec<SymbolPartition<'a>> = store.partitions().collect();
        let detected: Vec<(SymbolPartition<'a>, Arc<[Opportunity]>)> = partitions
            .into_par_iter()
            .map(|partition| {
                let found: Arc<[Opportunity]> = detector.detect(&partition).into();
                self.sink
                    .symbol_scanned(partition.symbol(), partition.exchange_count(), found.len());
                (partition, found)
            })
            .collect();
        let total = detected.iter().map(|(_, found)| found.len()).sum();

        let units = detected
            .into_iter()
            .flat_map(|(partition, opportunities)| {
                self.config
                    .profit_thresholds
                    .iter()
                    .map(move |&threshold| Unit {
                        partition,
                        opportunities: Arc::clone(&opportunities),
                        threshold,
                    })
            })
            .collect();
        (units, total)
    }
}

/// Identity of every unit a run will execute, in execution-independent order.
pub fn planned_units(store: &QuoteStore, thresholds: &[Decimal]) -> Vec<InstanceKey> {
    store
        .symbols()
        .flat_map(|symbol| {
            thresholds
                .iter()
                .map(move |t| InstanceKey::new(symbol.clone(), *t))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;
    use crate::testkit::sink::RecordingSink;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn quote(exchange: &str, ms: i64, bid: f64) -> Quote {
        Quote::try_new(
            exchange,
            "BTCUSDT",
            Utc.timestamp_millis_opt(ms).unwrap(),
            bid,
            bid,
        )
        .unwrap()
    }

    fn store() -> QuoteStore {
        QuoteStore::from_quotes([
            quote("A", 0, 100.0),
            quote("B", 0, 100.0),
            quote("A", 1, 100.0),
            quote("B", 1, 101.0),
            quote("A", 2, 102.0),
            quote("B", 2, 100.0),
        ])
    }

    fn config() -> BacktestConfig {
        BacktestConfig {
            profit_thresholds: vec![dec!(0.1), dec!(1.5)],
            workers: Some(2),
            ..BacktestConfig::default()
        }
    }

    #[test]
    fn default_thresholds_match_sweep() {
        assert_eq!(
            default_thresholds(),
            vec![dec!(0.1), dec!(0.25), dec!(0.3), dec!(0.35), dec!(0.4), dec!(0.5)]
        );
    }

    #[test]
    fn run_covers_every_unit() {
        let sink = Arc::new(RecordingSink::new());
        let backtester = Backtester::new(config(), sink.clone());
        let outcome = backtester.run(&store()).unwrap();

        assert_eq!(outcome.instances.len(), 2);
        assert_eq!(sink.started(), 2);
        assert_eq!(sink.finished().len(), 2);
        assert_eq!(
            outcome.instances.iter().map(|i| i.key.clone()).collect::<Vec<_>>(),
            planned_units(&store(), &config().profit_thresholds)
        );
    }

    #[test]
    fn outcome_lists_quote_counts_per_stream() {
        let outcome = Backtester::new(config(), Arc::new(RecordingSink::new()))
            .run(&store())
            .unwrap();
        let counts: Vec<(&str, usize)> = outcome
            .quote_counts
            .iter()
            .map(|c| (c.exchange.as_str(), c.quotes))
            .collect();
        assert_eq!(counts, vec![("A", 3), ("B", 3)]);
        assert!(outcome.quote_counts.iter().all(|c| c.symbol.as_str() == "BTCUSDT"));
    }

    #[test]
    fn stricter_threshold_trades_less() {
        let outcome = Backtester::new(config(), Arc::new(RecordingSink::new()))
            .run(&store())
            .unwrap();
        let low = outcome.instances[0].trades_executed;
        let high = outcome.instances[1].trades_executed;
        assert!(low >= 1);
        assert!(high <= low);
        assert_eq!(outcome.trades.len(), outcome.report.total_trades);
    }

    #[test]
    fn invalid_config_fails_before_work() {
        let sink = Arc::new(RecordingSink::new());
        let bad = BacktestConfig {
            commission_pct: -1.0,
            ..config()
        };
        assert!(Backtester::new(bad, sink.clone()).run(&store()).is_err());
        assert_eq!(sink.started(), 0);
    }

    #[test]
    fn empty_thresholds_rejected() {
        let bad = BacktestConfig {
            profit_thresholds: Vec::new(),
            ..config()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn foreign_quote_currency_fails_fast() {
        let store = QuoteStore::from_quotes([Quote::try_new(
            ExchangeId::from("A"),
            Symbol::from("BTCEUR"),
            Utc.timestamp_millis_opt(0).unwrap(),
            1.0,
            1.0,
        )
        .unwrap()]);
        let result = Backtester::new(config(), Arc::new(RecordingSink::new())).run(&store);
        assert!(matches!(
            result,
            Err(crate::error::Error::Domain(DomainError::SymbolCurrencyMismatch { .. }))
        ));
    }

    #[test]
    fn empty_store_produces_empty_report() {
        let outcome = Backtester::new(config(), Arc::new(RecordingSink::new()))
            .run(&QuoteStore::new())
            .unwrap();
        assert!(outcome.report.is_empty());
        assert!(outcome.instances.is_empty());
    }
}
