//! Currency conversion against a rate table
//!
//! A [`RateTable`] quotes every currency against one base currency. Tables
//! are produced by a rate source (see `services::rates`); this module only
//! does the arithmetic and input clean-up.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// Longest amount the input field accepts
pub const MAX_AMOUNT_INPUT_LEN: usize = 12;

/// Units of each currency per one unit of `base`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

/// Wire shape of the upstream "latest rates" response
#[derive(Debug, Deserialize)]
struct RatesPayload {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    conversion_rates: BTreeMap<String, f64>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl RateTable {
    /// Build a table, rejecting empty codes and non-positive rates
    ///
    /// The base currency is added at rate 1 when missing.
    pub fn new(
        base: &str,
        rates: BTreeMap<String, f64>,
        fetched_at: DateTime<Utc>,
    ) -> CalcResult<Self> {
        let base = normalize_code(base);
        if base.is_empty() {
            return Err(CalcError::Validation("Base currency code is empty".into()));
        }

        let mut normalized = BTreeMap::new();
        for (code, rate) in rates {
            let code = normalize_code(&code);
            if code.is_empty() {
                return Err(CalcError::Validation("Currency code is empty".into()));
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(CalcError::Validation(format!(
                    "Rate for {} must be a positive number, got {}",
                    code, rate
                )));
            }
            normalized.insert(code, rate);
        }
        normalized.entry(base.clone()).or_insert(1.0);

        Ok(Self {
            base,
            rates: normalized,
            fetched_at,
        })
    }

    /// Parse an upstream JSON payload (`{"result": "success", "conversion_rates": {...}}`)
    ///
    /// `fallback_base` is used when the payload does not name its base.
    pub fn from_payload(json: &str, fallback_base: &str) -> CalcResult<Self> {
        let payload: RatesPayload = serde_json::from_str(json)
            .map_err(|e| CalcError::Source(format!("Malformed rates payload: {}", e)))?;

        if payload.result != "success" {
            return Err(CalcError::Source(format!(
                "Rate source reported failure: {}",
                payload.error_type.as_deref().unwrap_or("unknown error")
            )));
        }

        let base = payload.base_code.as_deref().unwrap_or(fallback_base);
        Self::new(base, payload.conversion_rates, Utc::now())
    }

    /// Currency codes, sorted
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(&normalize_code(code))
    }

    /// Rate of `code` against the base
    pub fn rate(&self, code: &str) -> CalcResult<f64> {
        let code = normalize_code(code);
        self.rates.get(&code).copied().ok_or_else(|| {
            CalcError::Validation(format!("Unknown currency code: '{}'", code))
        })
    }

    /// Units of `to` per one unit of `from`
    pub fn cross_rate(&self, from: &str, to: &str) -> CalcResult<f64> {
        Ok(self.rate(to)? / self.rate(from)?)
    }

    /// The same table expressed against another base currency
    pub fn rebased(&self, base: &str) -> CalcResult<Self> {
        let divisor = self.rate(base)?;
        let rates = self
            .rates
            .iter()
            .map(|(code, rate)| (code.clone(), rate / divisor))
            .collect();
        Self::new(base, rates, self.fetched_at)
    }
}

fn clamp_amount(amount: f64) -> CalcResult<f64> {
    if amount.is_nan() {
        return Err(CalcError::Validation("Amount must be a number".into()));
    }
    Ok(amount.max(0.0))
}

/// Convert an amount in the table's base currency to `to_code`
///
/// Negative amounts count as zero.
pub fn convert_currency(amount: f64, to_code: &str, table: &RateTable) -> CalcResult<f64> {
    let amount = clamp_amount(amount)?;
    Ok(amount * table.rate(to_code)?)
}

/// Convert between any two currencies of the table
pub fn convert_between(amount: f64, from: &str, to: &str, table: &RateTable) -> CalcResult<f64> {
    let amount = clamp_amount(amount)?;
    Ok(amount * table.cross_rate(from, to)?)
}

/// Units of the base currency per one unit of `code`
pub fn inverse_rate(code: &str, table: &RateTable) -> CalcResult<f64> {
    Ok(1.0 / table.rate(code)?)
}

/// Clean up an amount typed into the exchange field
///
/// Keeps digits and the first `.`, turns a leading `.` into `0.`, and cuts
/// the result to [`MAX_AMOUNT_INPUT_LEN`] characters. Returns an empty string
/// when nothing usable is left.
pub fn sanitize_amount_input(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut seen_dot = false;
    for c in input.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            cleaned.push(c);
        }
    }

    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    cleaned.truncate(MAX_AMOUNT_INPUT_LEN);

    if cleaned.parse::<f64>().is_err() {
        return String::new();
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        let rates = BTreeMap::from([
            ("eur".to_string(), 0.9),
            ("TRY".to_string(), 32.5),
            ("JPY".to_string(), 150.0),
        ]);
        RateTable::new("usd", rates, Utc::now()).unwrap()
    }

    #[test]
    fn test_table_normalizes_codes() {
        let t = table();
        assert_eq!(t.base, "USD");
        assert_eq!(t.rate("USD").unwrap(), 1.0);
        assert_eq!(t.rate("eur").unwrap(), 0.9);
        assert_eq!(t.codes().collect::<Vec<_>>(), vec!["EUR", "JPY", "TRY", "USD"]);
    }

    #[test]
    fn test_convert_currency() {
        let t = table();
        assert_eq!(convert_currency(100.0, "TRY", &t).unwrap(), 3250.0);
        assert_eq!(convert_currency(-5.0, "EUR", &t).unwrap(), 0.0);
        assert!(convert_currency(1.0, "XYZ", &t).unwrap_err().is_validation());
        assert!(convert_currency(f64::NAN, "EUR", &t).is_err());
    }

    #[test]
    fn test_cross_and_inverse_rates() {
        let t = table();
        let yen = convert_between(9.0, "EUR", "JPY", &t).unwrap();
        assert!((yen - 1500.0).abs() < 1e-9);
        assert!((inverse_rate("EUR", &t).unwrap() - 1.111_111).abs() < 1e-6);
    }

    #[test]
    fn test_rebased() {
        let t = table().rebased("eur").unwrap();
        assert_eq!(t.base, "EUR");
        assert_eq!(t.rate("EUR").unwrap(), 1.0);
        assert!((t.rate("USD").unwrap() - 1.0 / 0.9).abs() < 1e-12);
        assert!(table().rebased("XYZ").is_err());
    }

    #[test]
    fn test_rejects_bad_rates() {
        let rates = BTreeMap::from([("EUR".to_string(), 0.0)]);
        assert!(RateTable::new("USD", rates, Utc::now()).is_err());
        assert!(RateTable::new(" ", BTreeMap::new(), Utc::now()).is_err());
    }

    #[test]
    fn test_from_payload() {
        let json = r#"{"result":"success","base_code":"EUR","conversion_rates":{"EUR":1,"USD":1.08}}"#;
        let t = RateTable::from_payload(json, "USD").unwrap();
        assert_eq!(t.base, "EUR");
        assert_eq!(t.rate("USD").unwrap(), 1.08);

        let failed = r#"{"result":"error","error-type":"invalid-key"}"#;
        let err = RateTable::from_payload(failed, "USD").unwrap_err();
        assert!(err.to_string().contains("invalid-key"));
        assert!(RateTable::from_payload("not json", "USD").is_err());
    }

    #[test]
    fn test_sanitize_amount_input() {
        assert_eq!(sanitize_amount_input("1,234.56"), "1234.56");
        assert_eq!(sanitize_amount_input(".5"), "0.5");
        assert_eq!(sanitize_amount_input("1.2.3"), "1.23");
        assert_eq!(sanitize_amount_input("-42"), "42");
        assert_eq!(sanitize_amount_input("12345678901234"), "123456789012");
        assert_eq!(sanitize_amount_input("abc"), "");
        assert_eq!(sanitize_amount_input("."), "0.");
        assert_eq!(sanitize_amount_input(""), "");
    }
}
