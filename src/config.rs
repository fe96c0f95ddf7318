//! Editor configuration.
//!
//! Resolved from defaults, then environment variables, then command-line
//! flags (applied by the caller through the `with_*` builders).

use std::env;
use std::path::{Path, PathBuf};

use log::warn;

use crate::state::FileStorage;

/// Default directory holding the state snapshot.
pub const DEFAULT_DATA_DIR: &str = ".table-editor";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TABLE_EDITOR_DATA_DIR";

/// Environment variable setting a snapshot size limit in bytes.
pub const MAX_STORAGE_BYTES_ENV: &str = "TABLE_EDITOR_MAX_STORAGE_BYTES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Directory holding `appState.json`.
    pub data_dir: PathBuf,

    /// Optional limit on the persisted snapshot size.
    pub max_storage_bytes: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Create a config with the default data directory and no quota.
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_storage_bytes: None,
        }
    }

    /// Defaults overridden by `TABLE_EDITOR_DATA_DIR` and
    /// `TABLE_EDITOR_MAX_STORAGE_BYTES`. An unparseable quota is ignored
    /// with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(MAX_STORAGE_BYTES_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(bytes) => config.max_storage_bytes = Some(bytes),
                Err(e) => warn!("Ignoring {}={:?}: {}", MAX_STORAGE_BYTES_ENV, raw, e),
            }
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.data_dir = data_dir.to_path_buf();
        self
    }

    pub fn with_max_storage_bytes(mut self, max_bytes: u64) -> Self {
        self.max_storage_bytes = Some(max_bytes);
        self
    }

    /// File storage configured from these settings.
    pub fn file_storage(&self) -> FileStorage {
        let storage = FileStorage::new(&self.data_dir);
        match self.max_storage_bytes {
            Some(max_bytes) => storage.with_quota(max_bytes),
            None => storage,
        }
    }
}
