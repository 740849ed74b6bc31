//! Handler for the `run` command.

use std::sync::Arc;

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::progress::ProgressSink;
use crate::adapter::inbound::cli::{config, output};
use crate::adapter::inbound::source::JsonlQuoteSource;
use crate::adapter::outbound::export::{CsvTradeExporter, JsonlTradeExporter};
use crate::adapter::outbound::report;
use crate::application::backtest::{planned_units, BacktestOutcome, Backtester};
use crate::application::store::QuoteStore;
use crate::error::Result;
use crate::port::TradeExporter;

/// Load quotes, run every (symbol, threshold) simulation and report.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = config::resolve_run(args)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Data", config.data.path.display());
    output::field(
        "Thresholds",
        config
            .backtest
            .profit_thresholds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    );
    output::field(
        "Commission",
        format!(
            "{}% ({})",
            config.backtest.commission_pct,
            config.backtest.commission_model.as_str()
        ),
    );

    let filter = config.data.filter()?;
    let source = JsonlQuoteSource::new(&config.data.path);
    let pb = output::spinner("Loading quotes");
    let loaded = match source.scan(&filter) {
        Ok(loaded) => loaded,
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load quotes");
            return Err(e);
        }
    };
    output::spinner_success(
        &pb,
        &format!(
            "Loaded {} quotes from {} files",
            loaded.quotes.len(),
            loaded.files
        ),
    );
    if loaded.malformed > 0 {
        output::warning(&format!("Skipped {} malformed rows", loaded.malformed));
    }
    if output::verbosity() > 0 {
        output::field("Empty files", loaded.empty_files);
        output::field("Filtered", loaded.filtered);
    }

    let store = QuoteStore::from_quotes(loaded.quotes);
    if store.is_empty() {
        output::warning("No quotes matched the data filters; nothing to simulate");
        return Ok(());
    }

    let backtest = config.backtest.to_backtest_config();
    output::field("Symbols", store.symbols().count());
    output::field("Workers", backtest.worker_count());

    let units = planned_units(&store, &backtest.profit_thresholds).len();
    let bar = output::progress(units as u64, "Simulating");
    let sink = Arc::new(ProgressSink::new(bar.clone()));
    let outcome = Backtester::new(backtest, sink).run(&store);
    bar.finish_and_clear();
    let outcome = outcome?;

    export(args, &outcome)?;
    render(&outcome)?;
    Ok(())
}

fn export(args: &RunArgs, outcome: &BacktestOutcome) -> Result<()> {
    if let Some(path) = &args.export_csv {
        let written = CsvTradeExporter::new(path).export(&outcome.trades)?;
        info!(path = %path.display(), trades = written, "Exported trades");
        output::success(&format!("Wrote {written} trades to {}", path.display()));
    }
    if let Some(path) = &args.export_jsonl {
        let written = JsonlTradeExporter::new(path).export(&outcome.trades)?;
        info!(path = %path.display(), trades = written, "Exported trades");
        output::success(&format!("Wrote {written} trades to {}", path.display()));
    }
    Ok(())
}

fn render(outcome: &BacktestOutcome) -> Result<()> {
    if output::is_json() {
        output::json_result("backtest", serde_json::to_value(outcome)?);
        return Ok(());
    }

    for (symbol, table) in report::symbol_tables(&outcome.report) {
        output::section(&symbol);
        output::lines(&table);
    }
    if output::verbosity() > 0 {
        output::section("Quotes");
        for count in &outcome.quote_counts {
            output::field(&format!("{} {}", count.symbol, count.exchange), count.quotes);
        }
        output::section("Instances");
        output::lines(&report::instance_table(&outcome.instances));
    }

    output::section("Summary");
    output::field("Run", output::muted(outcome.run_id));
    output::field("Quotes", outcome.quotes);
    output::field("Opportunities", outcome.opportunities);
    output::field("Trades", outcome.report.total_trades);
    output::field("Volume", format!("{:.2}", outcome.report.total_volume));
    output::field("Profit", output::signed(outcome.report.total_profit, 6));
    let elapsed = outcome.finished_at - outcome.started_at;
    output::field(
        "Elapsed",
        format!("{:.3}s", elapsed.num_milliseconds() as f64 / 1000.0),
    );

    if outcome.report.is_empty() {
        output::warning("No trades executed at any threshold");
    } else {
        output::success("Backtest complete");
    }
    Ok(())
}
