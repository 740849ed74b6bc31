//! Handler for the `opportunities` command.

use crate::adapter::inbound::cli::command::OpportunitiesArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::adapter::inbound::source::JsonlQuoteSource;
use crate::adapter::outbound::report;
use crate::application::detector::OpportunityDetector;
use crate::application::store::QuoteStore;
use crate::domain::{Opportunity, Symbol};
use crate::error::Result;

/// Detect and list opportunities for a single symbol.
pub fn execute(args: &OpportunitiesArgs) -> Result<()> {
    let config = config::resolve_opportunities(args)?;
    config.init_logging();

    let symbol = Symbol::new(&args.symbol);
    let filter = config.data.filter()?;
    let pb = output::spinner(&format!("Loading {symbol} quotes"));
    let loaded = match JsonlQuoteSource::new(&config.data.path).scan(&filter) {
        Ok(loaded) => loaded,
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load quotes");
            return Err(e);
        }
    };
    output::spinner_success(&pb, &format!("Loaded {} quotes", loaded.quotes.len()));

    let store = QuoteStore::from_quotes(loaded.quotes);
    let Some(partition) = store.partition(&symbol) else {
        output::warning(&format!("No quotes found for {symbol}"));
        return Ok(());
    };

    let detector = OpportunityDetector::new(config.backtest.to_backtest_config().detector_config());
    let found = select(detector.detect(&partition), args.min_profit, args.limit);

    if output::is_json() {
        output::json_result(
            "opportunities",
            serde_json::json!({
                "symbol": symbol,
                "total": found.total,
                "opportunities": found.shown,
            }),
        );
        return Ok(());
    }

    output::section(&format!(
        "{} ({} exchanges)",
        output::highlight(&symbol),
        partition.exchange_count()
    ));
    if found.shown.is_empty() {
        output::note("No opportunities");
        return Ok(());
    }
    output::lines(&report::opportunity_table(&found.shown));
    if found.shown.len() < found.total {
        output::note(&format!(
            "Showing {} of {} (use --limit 0 for all)",
            found.shown.len(),
            found.total
        ));
    } else {
        output::field("Total", found.total);
    }
    Ok(())
}

struct Selection {
    total: usize,
    shown: Vec<Opportunity>,
}

/// Time-ordered, thresholded and truncated view of a detection result.
fn select(mut found: Vec<Opportunity>, min_profit: Option<f64>, limit: usize) -> Selection {
    if let Some(min) = min_profit {
        found.retain(|o| o.profit_pct() >= min);
    }
    found.sort_by(|a, b| {
        a.timestamp()
            .cmp(&b.timestamp())
            .then_with(|| a.buy_exchange().cmp(b.buy_exchange()))
            .then_with(|| a.sell_exchange().cmp(b.sell_exchange()))
    });
    let total = found.len();
    if limit > 0 {
        found.truncate(limit);
    }
    Selection {
        total,
        shown: found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::opportunity;

    #[test]
    fn test_select_sorts_by_time_and_truncates() {
        let found = vec![
            opportunity("BTCUSDT", 3, ("A", 100.0), ("B", 101.0)),
            opportunity("BTCUSDT", 1, ("B", 100.0), ("A", 102.0)),
            opportunity("BTCUSDT", 2, ("A", 100.0), ("B", 100.5)),
        ];
        let selection = select(found, None, 2);
        assert_eq!(selection.total, 3);
        let times: Vec<i64> = selection
            .shown
            .iter()
            .map(|o| o.timestamp().timestamp_millis())
            .collect();
        assert_eq!(times, vec![1, 2]);
    }

    #[test]
    fn test_select_applies_min_profit() {
        let found = vec![
            opportunity("BTCUSDT", 1, ("A", 100.0), ("B", 101.0)),
            opportunity("BTCUSDT", 2, ("A", 100.0), ("B", 100.1)),
        ];
        let selection = select(found, Some(0.5), 0);
        assert_eq!(selection.total, 1);
        assert_eq!(selection.shown[0].sell_price(), 101.0);
    }
}
