//! Text rendering of the aggregate report.
//!
//! One table per symbol with a row per threshold. The threshold with the
//! highest profit is marked as best, ties going to the lowest threshold.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::simulation::InstanceSummary;
use crate::domain::{AggregateReport, Opportunity, SymbolStats};

#[derive(Tabled)]
struct ThresholdRow {
    #[tabled(rename = "Threshold %")]
    threshold: String,
    #[tabled(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Avg %")]
    average: String,
    #[tabled(rename = "Pairs")]
    pairs: String,
    #[tabled(rename = "")]
    best: &'static str,
}

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Threshold %")]
    threshold: String,
    #[tabled(rename = "Considered")]
    considered: usize,
    #[tabled(rename = "Executed")]
    executed: usize,
    #[tabled(rename = "Skipped")]
    skipped: usize,
    #[tabled(rename = "Fees (quote)")]
    fees_quote: String,
    #[tabled(rename = "Fees (base)")]
    fees_base: String,
}

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Buy")]
    buy: String,
    #[tabled(rename = "Sell")]
    sell: String,
    #[tabled(rename = "Profit %")]
    profit: String,
}

/// Table for one symbol, or `None` if it never traded.
#[must_use]
pub fn symbol_table(stats: &SymbolStats) -> Option<String> {
    if stats.by_threshold.is_empty() {
        return None;
    }
    let best = stats.best_threshold();
    let rows: Vec<ThresholdRow> = stats
        .by_threshold
        .iter()
        .map(|(threshold, t)| ThresholdRow {
            threshold: threshold.to_string(),
            trades: t.trades,
            profit: format!("{:.4}", t.profit),
            volume: format!("{:.2}", t.volume),
            average: format!("{:.4}", t.average_profit_pct),
            pairs: t
                .pair_counts
                .iter()
                .map(|(pair, count)| format!("{pair}: {count}"))
                .collect::<Vec<_>>()
                .join(", "),
            best: if Some(*threshold) == best { "best" } else { "" },
        })
        .collect();
    Some(Table::new(rows).with(Style::rounded()).to_string())
}

/// `(symbol, table)` for every symbol with trades.
#[must_use]
pub fn symbol_tables(report: &AggregateReport) -> Vec<(String, String)> {
    report
        .by_symbol
        .iter()
        .filter_map(|(symbol, stats)| symbol_table(stats).map(|t| (symbol.to_string(), t)))
        .collect()
}

#[must_use]
pub fn instance_table(instances: &[InstanceSummary]) -> String {
    let rows: Vec<InstanceRow> = instances
        .iter()
        .map(|s| InstanceRow {
            symbol: s.key.symbol.to_string(),
            threshold: s.key.threshold.to_string(),
            considered: s.opportunities_considered,
            executed: s.trades_executed,
            skipped: s.opportunities_skipped,
            fees_quote: format!("{:.6}", s.fees.quote),
            fees_base: format!("{:.8}", s.fees.base),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[must_use]
pub fn opportunity_table(opportunities: &[Opportunity]) -> String {
    let rows: Vec<OpportunityRow> = opportunities
        .iter()
        .map(|o| OpportunityRow {
            time: o.timestamp().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            buy: format!("{} @ {}", o.buy_exchange(), o.buy_price()),
            sell: format!("{} @ {}", o.sell_exchange(), o.sell_price()),
            profit: format!("{:.4}", o.profit_pct()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
