//! Tracing subscriber setup
//!
//! Filter precedence: `CALCDECK_LOG`, then `--verbose`, then the
//! `log_level` setting. CLI commands log to stderr so stdout stays clean;
//! the TUI owns the terminal and logs to a file instead.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{CalcError, CalcResult};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "CALCDECK_LOG";

/// Where log records go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Pick the filter directive
pub fn resolve_directive(env: Option<&str>, verbose: bool, setting: &str) -> String {
    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => "debug".to_string(),
        None => setting.trim().to_string(),
    }
}

fn make_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber; later calls are no-ops
pub fn init(target: LogTarget, verbose: bool, setting: &str) -> CalcResult<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = make_filter(&resolve_directive(env.as_deref(), verbose, setting));

    // An already-installed subscriber (tests, repeated init) is fine
    let _ = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    CalcError::Io(format!("Cannot open log file {}: {}", path.display(), e))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_precedence() {
        assert_eq!(resolve_directive(Some("calcdeck=trace"), true, "warn"), "calcdeck=trace");
        assert_eq!(resolve_directive(Some("  "), true, "warn"), "debug");
        assert_eq!(resolve_directive(None, true, "warn"), "debug");
        assert_eq!(resolve_directive(None, false, "info"), "info");
    }

    #[test]
    fn test_bad_directive_falls_back() {
        // Must not panic
        let _ = make_filter("not a [valid directive");
    }
}
