//! User settings for calcdeck
//!
//! Manages user preferences: display precision, number formatting, keyboard
//! handling, exchange-rate refresh and price-fetch pacing.

use serde::{Deserialize, Serialize};

use super::paths::CalcPaths;
use crate::error::CalcError;
use crate::storage::file_io::write_json_atomic;

/// Longest accepted rate refresh interval (one week)
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// Thousands/decimal separators used for financial and currency output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

/// Exchange calculator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// Currency the rate table is quoted against
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Seconds between background rate refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Delay collapsing repeated refresh requests
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Results above this magnitude switch to exponential notation
    #[serde(default = "default_exponent_threshold")]
    pub exponent_threshold: f64,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            refresh_interval_secs: default_refresh_interval(),
            debounce_ms: default_debounce_ms(),
            exponent_threshold: default_exponent_threshold(),
        }
    }
}

/// Investment tracker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Pause between consecutive quote requests when backfilling a list
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// Stock symbols shown by default
    #[serde(default = "default_stocks")]
    pub stocks: Vec<String>,

    /// Crypto identifiers shown by default
    #[serde(default = "default_cryptos")]
    pub cryptos: Vec<String>,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay(),
            stocks: default_stocks(),
            cryptos: default_cryptos(),
        }
    }
}

/// User settings for calcdeck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Decimal digits used when rendering results
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Whether the TUI keypad reacts to the keyboard
    #[serde(default = "default_true")]
    pub keyboard_enabled: bool,

    /// Separators for financial and currency output
    #[serde(default)]
    pub number_format: NumberFormat,

    /// Currency symbol for financial output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub exchange: ExchangeSettings,

    #[serde(default)]
    pub quotes: QuoteSettings,

    /// Default tracing filter when neither CALCDECK_LOG nor --verbose is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_precision() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_refresh_interval() -> u64 {
    5 * 60
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_exponent_threshold() -> f64 {
    999_999_999_999.0
}

fn default_request_delay() -> u64 {
    200
}

fn default_stocks() -> Vec<String> {
    ["AAPL", "MSFT", "GOOGL", "AMZN", "META"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_cryptos() -> Vec<String> {
    ["bitcoin", "ethereum", "binancecoin", "ripple", "cardano"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            precision: default_precision(),
            keyboard_enabled: true,
            number_format: NumberFormat::default(),
            currency_symbol: default_currency(),
            exchange: ExchangeSettings::default(),
            quotes: QuoteSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CalcPaths) -> Result<Self, CalcError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CalcError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CalcError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CalcPaths) -> Result<(), CalcError> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Reject values the calculator cannot work with
    pub fn validate(&self) -> Result<(), CalcError> {
        if self.precision > 15 {
            return Err(CalcError::Config(format!(
                "precision must be between 0 and 15, got {}",
                self.precision
            )));
        }
        if self.exchange.refresh_interval_secs == 0
            || self.exchange.refresh_interval_secs > MAX_REFRESH_INTERVAL_SECS
        {
            return Err(CalcError::Config(format!(
                "exchange.refresh_interval_secs must be between 1 and {}, got {}",
                MAX_REFRESH_INTERVAL_SECS, self.exchange.refresh_interval_secs
            )));
        }
        if self.number_format.thousands_separator == self.number_format.decimal_separator {
            return Err(CalcError::Config(
                "thousands and decimal separators must differ".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.precision, 8);
        assert!(settings.keyboard_enabled);
        assert_eq!(settings.exchange.refresh_interval_secs, 300);
        assert_eq!(settings.quotes.request_delay_ms, 200);
        assert_eq!(settings.quotes.stocks.len(), 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CalcPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.precision = 4;
        settings.number_format = NumberFormat {
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
        };

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.precision, 4);
        assert_eq!(loaded.number_format.decimal_separator, ",");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CalcPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"precision": 2}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.precision, 2);
        assert_eq!(loaded.exchange.base_currency, "USD");
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_rejects_out_of_range_refresh_interval() {
        let mut settings = Settings::default();
        settings.exchange.refresh_interval_secs = 0;
        assert!(settings.validate().is_err());
        settings.exchange.refresh_interval_secs = u64::MAX;
        assert!(settings.validate().is_err());
        settings.exchange.refresh_interval_secs = MAX_REFRESH_INTERVAL_SECS;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_precision() {
        let settings = Settings {
            precision: 40,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
