//! Price quotes for the investment tracker

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::error::{CalcError, CalcResult};
use crate::models::{AssetKind, Quote};
use crate::storage::file_io::read_text;

/// Supplies the latest quote for a symbol
pub trait QuoteSource: Send + Sync {
    fn quote(&self, symbol: &str, kind: AssetKind) -> CalcResult<Quote>;
}

fn find_quote(quotes: &[Quote], symbol: &str, kind: AssetKind) -> CalcResult<Quote> {
    quotes
        .iter()
        .find(|q| q.matches(symbol, kind))
        .cloned()
        .ok_or_else(|| CalcError::Source(format!("No {} quote for {}", kind, symbol.trim())))
}

/// Reads a JSON array of quotes from disk on every lookup
#[derive(Debug, Clone)]
pub struct FileQuoteSource {
    path: PathBuf,
}

impl FileQuoteSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> CalcResult<Vec<Quote>> {
        let raw = read_text(&self.path)?.ok_or_else(|| {
            CalcError::Source(format!("No quote snapshot at {}", self.path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| CalcError::Source(format!("Malformed quote snapshot: {}", e)))
    }
}

impl QuoteSource for FileQuoteSource {
    fn quote(&self, symbol: &str, kind: AssetKind) -> CalcResult<Quote> {
        find_quote(&self.load()?, symbol, kind)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    quotes: Vec<Quote>,
}

impl StaticQuoteSource {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }
}

impl QuoteSource for StaticQuoteSource {
    fn quote(&self, symbol: &str, kind: AssetKind) -> CalcResult<Quote> {
        find_quote(&self.quotes, symbol, kind)
    }
}

/// Fetch quotes one at a time, in order, sleeping `delay` between requests
///
/// Symbols that fail are logged and left out.
pub fn fetch_sequenced(
    source: &dyn QuoteSource,
    symbols: &[(String, AssetKind)],
    delay: Duration,
) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(symbols.len());
    for (i, (symbol, kind)) in symbols.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        match source.quote(symbol, *kind) {
            Ok(quote) => quotes.push(quote),
            Err(e) => warn!(symbol = %symbol, error = %e, "skipping quote"),
        }
    }
    quotes
}
