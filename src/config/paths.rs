//! Path management for calcdeck
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `CALCDECK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/calcdeck` or `~/.config/calcdeck`
//! 3. Windows: `%APPDATA%\calcdeck`

use std::path::PathBuf;

use crate::error::CalcError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CALCDECK_DATA_DIR";

/// Manages all paths used by calcdeck
#[derive(Debug, Clone)]
pub struct CalcPaths {
    /// Base directory for all calcdeck data
    base_dir: PathBuf,
}

impl CalcPaths {
    /// Create a new CalcPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, CalcError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CalcPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/calcdeck/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the key-value store
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the exchange-rate snapshot
    pub fn rates_file(&self) -> PathBuf {
        self.base_dir.join("rates.json")
    }

    /// Get the path to the price-quote snapshot
    pub fn quotes_file(&self) -> PathBuf {
        self.base_dir.join("quotes.json")
    }

    /// Get the path to the log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("calcdeck.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CalcError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CalcError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CalcError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CalcError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("calcdeck"));
    }
    let base = directories::BaseDirs::new()
        .ok_or_else(|| CalcError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join("calcdeck"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CalcError> {
    let base = directories::BaseDirs::new()
        .ok_or_else(|| CalcError::Config("Could not determine APPDATA directory".into()))?;
    Ok(base.config_dir().join("calcdeck"))
}
