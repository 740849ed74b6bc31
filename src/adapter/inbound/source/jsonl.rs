//! JSON Lines quote source.
//!
//! Reads one quote object per line from a single file or from every
//! `*.jsonl` file below a directory. Field names follow the recorder's
//! output (`Exchange`, `Symbol`, `Timestamp`, `BestBid`, `BestAsk`) and the
//! camel-case and snake-case spellings are accepted as aliases. Timestamps
//! are epoch milliseconds. Prices may be numbers or numeric strings; null or
//! unparseable prices read as zero, which keeps the quote out of detection.
//!
//! Empty files are skipped. Lines that fail to parse or validate are logged
//! and counted, never fatal.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{Quote, QuoteFilter};
use crate::error::{Error, Result};
use crate::port::QuoteSource;

const EXTENSION: &str = "jsonl";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    fn value(price: Option<Self>) -> f64 {
        match price {
            Some(Self::Number(n)) => n,
            Some(Self::Text(s)) => s.trim().parse().unwrap_or(0.0),
            None => 0.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    #[serde(alias = "Exchange")]
    exchange: String,
    #[serde(alias = "Symbol")]
    symbol: String,
    #[serde(alias = "Timestamp")]
    timestamp: i64,
    #[serde(default, alias = "bestBid", alias = "BestBid")]
    best_bid: Option<RawPrice>,
    #[serde(default, alias = "bestAsk", alias = "BestAsk")]
    best_ask: Option<RawPrice>,
}

impl QuoteRow {
    fn into_quote(self) -> std::result::Result<Quote, String> {
        let timestamp = Utc
            .timestamp_millis_opt(self.timestamp)
            .single()
            .ok_or_else(|| format!("timestamp out of range: {}", self.timestamp))?;
        Quote::try_new(
            self.exchange,
            self.symbol,
            timestamp,
            RawPrice::value(self.best_bid),
            RawPrice::value(self.best_ask),
        )
        .map_err(|e| e.to_string())
    }
}

/// Outcome of scanning a quote source.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub quotes: Vec<Quote>,
    pub files: usize,
    pub empty_files: usize,
    pub malformed: usize,
    pub filtered: usize,
}

/// Loads quotes from JSON Lines files.
#[derive(Debug, Clone)]
pub struct JsonlQuoteSource {
    path: PathBuf,
}

impl JsonlQuoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every file and report what was kept and dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or a file cannot be read.
    pub fn scan(&self, filter: &QuoteFilter) -> Result<LoadReport> {
        let files = self.files()?;
        info!(path = %self.path.display(), files = files.len(), "Scanning quote files");

        let mut report = LoadReport::default();
        for file in files {
            if fs::metadata(&file)?.len() == 0 {
                debug!(file = %file.display(), "Skipping empty file");
                report.empty_files += 1;
                continue;
            }
            report.files += 1;
            read_file(&file, filter, &mut report)?;
        }

        info!(
            quotes = report.quotes.len(),
            files = report.files,
            empty_files = report.empty_files,
            malformed = report.malformed,
            filtered = report.filtered,
            "Quote scan complete"
        );
        Ok(report)
    }

    /// Data files in lexical path order.
    fn files(&self) -> Result<Vec<PathBuf>> {
        if self.path.is_file() {
            return Ok(vec![self.path.clone()]);
        }
        if !self.path.is_dir() {
            return Err(Error::Data(format!(
                "data path does not exist: {}",
                self.path.display()
            )));
        }
        let mut files = Vec::new();
        collect_files(&self.path, &mut files)?;
        files.sort();
        Ok(files)
    }
}

impl QuoteSource for JsonlQuoteSource {
    fn load(&self, filter: &QuoteFilter) -> Result<Vec<Quote>> {
        Ok(self.scan(filter)?.quotes)
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == EXTENSION) {
            files.push(path);
        }
    }
    Ok(())
}

fn read_file(path: &Path, filter: &QuoteFilter, report: &mut LoadReport) -> Result<()> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let mut buf = Vec::new();
    let mut index = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        index += 1;
        let line = trim_ascii(&buf);
        if line.is_empty() {
            continue;
        }
        let parsed = serde_json::from_slice::<QuoteRow>(line)
            .map_err(|e| e.to_string())
            .and_then(QuoteRow::into_quote);
        match parsed {
            Ok(quote) if filter.accepts(&quote) => report.quotes.push(quote),
            Ok(_) => report.filtered += 1,
            Err(error) => {
                warn!(
                    file = %path.display(),
                    line = index,
                    error = %error,
                    "Skipping malformed quote"
                );
                report.malformed += 1;
            }
        }
    }
    Ok(())
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
