//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Exchange identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(String);

impl ExchangeId {
    /// Create a new ExchangeId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the exchange ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExchangeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Trading symbol such as `BTCUSDT`.
///
/// Construction normalizes the raw exchange spelling: separators are removed
/// and letters are upper-cased, so `btc-usdt`, `BTC_USDT` and `BTC/USDT`
/// all map to the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a normalized symbol.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | '/'))
            .flat_map(char::to_uppercase)
            .collect();
        Self(normalized)
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(base, quote)` currencies for the given quote currency.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SymbolCurrencyMismatch`] when the symbol does not
    /// end in `quote_currency` or has no base part.
    pub fn split(&self, quote_currency: &str) -> Result<(String, String), DomainError> {
        let quote = quote_currency.to_uppercase();
        match self.0.strip_suffix(quote.as_str()) {
            Some(base) if !base.is_empty() => Ok((base.to_string(), quote)),
            _ => Err(DomainError::SymbolCurrencyMismatch {
                symbol: self.0.clone(),
                quote_currency: quote,
            }),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_id_new_and_as_str() {
        let id = ExchangeId::new("Binance");
        assert_eq!(id.as_str(), "Binance");
    }

    #[test]
    fn exchange_id_display() {
        let id = ExchangeId::from("OKX");
        assert_eq!(format!("{}", id), "OKX");
    }

    #[test]
    fn symbol_strips_separators_and_uppercases() {
        assert_eq!(Symbol::new("btc-usdt").as_str(), "BTCUSDT");
        assert_eq!(Symbol::new("ETH_USDT").as_str(), "ETHUSDT");
        assert_eq!(Symbol::new("sol/usdt").as_str(), "SOLUSDT");
    }

    #[test]
    fn symbol_split_returns_base_and_quote() {
        let symbol = Symbol::from("BTCUSDT");
        let (base, quote) = symbol.split("usdt").unwrap();
        assert_eq!(base, "BTC");
        assert_eq!(quote, "USDT");
    }

    #[test]
    fn symbol_split_rejects_foreign_quote() {
        let symbol = Symbol::from("BTCEUR");
        assert!(matches!(
            symbol.split("USDT"),
            Err(DomainError::SymbolCurrencyMismatch { .. })
        ));
    }

    #[test]
    fn symbol_split_rejects_bare_quote() {
        let symbol = Symbol::from("USDT");
        assert!(symbol.split("USDT").is_err());
    }

    #[test]
    fn symbol_serde_normalizes() {
        let symbol: Symbol = serde_json::from_str("\"btc-usdt\"").unwrap();
        assert_eq!(symbol, Symbol::from("BTCUSDT"));
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"BTCUSDT\"");
    }
}
