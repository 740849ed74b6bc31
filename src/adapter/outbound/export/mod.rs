//! Flat trade export, one row per executed trade.

mod csv;
mod jsonl;

pub use self::csv::{render_csv, CsvTradeExporter};
pub use self::jsonl::JsonlTradeExporter;

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Create the parent directory of `path` if it is missing.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
