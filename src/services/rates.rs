//! Exchange-rate sources and background refresh
//!
//! A [`RateSource`] hands out a [`RateTable`]; the shipped binary reads a
//! snapshot file. [`RatePoller`] refreshes on a fixed interval and on
//! debounced requests from a worker thread, and stops when dropped.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::calc::exchange::RateTable;
use crate::error::{CalcError, CalcResult};
use crate::storage::file_io::read_text;

/// Supplies exchange rates against a base currency
pub trait RateSource: Send + Sync {
    fn fetch(&self, base: &str) -> CalcResult<RateTable>;
}

/// Reads rates from a JSON file
///
/// Accepts either the upstream "latest rates" payload or a saved
/// [`RateTable`].
#[derive(Debug, Clone)]
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl RateSource for FileRateSource {
    fn fetch(&self, base: &str) -> CalcResult<RateTable> {
        let raw = read_text(&self.path)?.ok_or_else(|| {
            CalcError::Source(format!(
                "No exchange-rate snapshot at {}",
                self.path.display()
            ))
        })?;

        let table = match RateTable::from_payload(&raw, base) {
            Ok(table) => table,
            Err(payload_err) => serde_json::from_str::<RateTable>(&raw)
                .map_err(|_| payload_err)
                .and_then(|t| RateTable::new(&t.base, t.rates, t.fetched_at))?,
        };

        if table.base.eq_ignore_ascii_case(base) {
            Ok(table)
        } else {
            table.rebased(base)
        }
    }
}

/// A fixed table; used for tests and offline defaults
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    table: RateTable,
}

impl StaticRateSource {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }
}

impl RateSource for StaticRateSource {
    fn fetch(&self, base: &str) -> CalcResult<RateTable> {
        self.table.rebased(base)
    }
}

/// Delivered by [`RatePoller`]
#[derive(Debug, Clone)]
pub enum RateUpdate {
    Refreshed(RateTable),
    Failed(String),
}

enum Control {
    Refresh,
    Stop,
}

/// Background rate refresher
///
/// Fetches once at start, then every `interval`. [`request_refresh`]
/// schedules an extra fetch after `debounce` of quiet; repeated requests
/// push it back. Dropping the poller joins the worker, so nothing is
/// delivered afterwards.
///
/// [`request_refresh`]: RatePoller::request_refresh
pub struct RatePoller {
    control: mpsc::Sender<Control>,
    updates: mpsc::Receiver<RateUpdate>,
    worker: Option<JoinHandle<()>>,
}

impl RatePoller {
    pub fn spawn(
        source: Arc<dyn RateSource>,
        base: impl Into<String>,
        interval: Duration,
        debounce: Duration,
    ) -> Self {
        let base = base.into();
        let (control, control_rx) = mpsc::channel();
        let (updates_tx, updates) = mpsc::channel();

        let worker = thread::spawn(move || {
            let fetch = || match source.fetch(&base) {
                Ok(table) => {
                    debug!(base = %table.base, currencies = table.rates.len(), "rates refreshed");
                    RateUpdate::Refreshed(table)
                }
                Err(e) => {
                    warn!(error = %e, "rate refresh failed");
                    RateUpdate::Failed(e.to_string())
                }
            };

            if updates_tx.send(fetch()).is_err() {
                return;
            }
            // `None` when the interval runs past what `Instant` can represent
            let mut next_poll = Instant::now().checked_add(interval);
            let mut pending: Option<Instant> = None;

            loop {
                let deadline = match (pending, next_poll) {
                    (Some(p), Some(n)) => Some(p.min(n)),
                    (p, n) => p.or(n),
                };
                let message = match deadline {
                    Some(d) => {
                        control_rx.recv_timeout(d.saturating_duration_since(Instant::now()))
                    }
                    None => control_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                };

                match message {
                    Ok(Control::Refresh) => {
                        let now = Instant::now();
                        pending = Some(now.checked_add(debounce).unwrap_or(now));
                    }
                    Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }

                // Checked after every message so refresh requests cannot starve the interval
                let now = Instant::now();
                let debounced = pending.is_some_and(|p| p <= now);
                let due = next_poll.is_some_and(|n| n <= now);
                if debounced || due {
                    pending = None;
                    next_poll = now.checked_add(interval);
                    if updates_tx.send(fetch()).is_err() {
                        break;
                    }
                }
            }
            debug!("rate poller stopped");
        });

        Self {
            control,
            updates,
            worker: Some(worker),
        }
    }

    /// Ask for a refresh once requests stop arriving for the debounce period
    pub fn request_refresh(&self) {
        let _ = self.control.send(Control::Refresh);
    }

    /// Next update if one is waiting
    pub fn try_recv(&self) -> Option<RateUpdate> {
        self.updates.try_recv().ok()
    }

    /// Wait up to `timeout` for the next update
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RateUpdate> {
        self.updates.recv_timeout(timeout).ok()
    }
}

impl Drop for RatePoller {
    fn drop(&mut self) {
        let _ = self.control.send(Control::Stop);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
