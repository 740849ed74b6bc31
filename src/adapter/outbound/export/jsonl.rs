//! JSON Lines trade export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::domain::TradeRecord;
use crate::error::Result;
use crate::port::TradeExporter;

/// Writes one JSON object per trade per line.
#[derive(Debug, Clone)]
pub struct JsonlTradeExporter {
    path: PathBuf,
}

impl JsonlTradeExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TradeExporter for JsonlTradeExporter {
    fn export(&self, trades: &[TradeRecord]) -> Result<usize> {
        super::ensure_parent(&self.path)?;
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for trade in trades {
            serde_json::to_writer(&mut writer, trade)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(trades.len())
    }
}
