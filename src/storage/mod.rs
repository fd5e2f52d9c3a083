//! Storage layer for calcdeck
//!
//! Every persisted record goes through a [`KeyValueStore`]. On disk that is
//! one JSON file per key under the data directory, written atomically.

pub mod activities;
pub mod file_io;
pub mod history;
pub mod kv;
pub mod portfolio;
pub mod users;

pub use activities::ActivityRepository;
pub use file_io::{read_json, write_json_atomic};
pub use history::HistoryRepository;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use portfolio::PortfolioRepository;
pub use users::UserRepository;

use std::sync::Arc;

use crate::config::paths::CalcPaths;
use crate::error::CalcError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    pub users: UserRepository,
    pub activities: ActivityRepository,
    pub history: HistoryRepository,
    pub portfolio: PortfolioRepository,
}

impl Storage {
    /// Open file-backed storage under the configured data directory
    pub fn new(paths: &CalcPaths) -> Result<Self, CalcError> {
        paths.ensure_directories()?;
        let store = FileStore::new(paths.data_dir())?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Build repositories over any store
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            users: UserRepository::new(Arc::clone(&store)),
            activities: ActivityRepository::new(Arc::clone(&store)),
            history: HistoryRepository::new(Arc::clone(&store)),
            portfolio: PortfolioRepository::new(Arc::clone(&store)),
            store,
        }
    }

    /// Storage that vanishes with the process
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// The underlying store
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}
