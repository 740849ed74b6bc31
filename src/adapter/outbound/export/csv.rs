//! CSV trade export.

use std::fs;
use std::path::PathBuf;

use crate::domain::TradeRecord;
use crate::error::Result;
use crate::port::TradeExporter;

const HEADER: &str = "profit_threshold,symbol,timestamp_ms,buy_exchange,sell_exchange,buy_price,sell_price,net_profit_pct,amount_base,amount_quote_currency,profit_quote_currency\n";

/// Render trades as CSV with a header row.
#[must_use]
pub fn render_csv(trades: &[TradeRecord]) -> String {
    let mut csv = String::from(HEADER);
    for trade in trades {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{:.6},{},{},{}\n",
            trade.profit_threshold,
            field(trade.symbol.as_str()),
            trade.timestamp.timestamp_millis(),
            field(trade.buy_exchange.as_str()),
            field(trade.sell_exchange.as_str()),
            trade.buy_price,
            trade.sell_price,
            trade.net_profit_pct,
            trade.amount_base,
            trade.amount_quote_currency,
            trade.profit_quote_currency,
        ));
    }
    csv
}

/// Quote a field when it contains a delimiter, quote or newline.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Writes trades to a CSV file, replacing any existing file.
#[derive(Debug, Clone)]
pub struct CsvTradeExporter {
    path: PathBuf,
}

impl CsvTradeExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TradeExporter for CsvTradeExporter {
    fn export(&self, trades: &[TradeRecord]) -> Result<usize> {
        super::ensure_parent(&self.path)?;
        fs::write(&self.path, render_csv(trades))?;
        Ok(trades.len())
    }
}
