//! State Storage Backends
//!
//! The store persists one serialized snapshot through [`StateStorage`], so
//! the reducer and store never depend on a concrete medium. Two backends are
//! provided: an in-process [`MemoryStorage`] and a file-backed
//! [`FileStorage`] that keeps the snapshot at `<data_dir>/appState.json`.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, TableEditorError};

/// Fixed key under which the application state is stored.
pub const STORAGE_KEY: &str = "appState";

/// Extension for the snapshot file written by [`FileStorage`].
const SNAPSHOT_EXTENSION: &str = "json";

/// Synchronous byte storage for a single state snapshot.
pub trait StateStorage {
    /// Read the stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored snapshot.
    fn save(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<S: StateStorage + ?Sized> StateStorage for Box<S> {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        (**self).load()
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).save(bytes)
    }
}

fn check_quota(limit: Option<u64>, bytes: &[u8]) -> Result<()> {
    match limit {
        Some(limit_bytes) if bytes.len() as u64 > limit_bytes => {
            Err(TableEditorError::StorageQuotaExceeded {
                needed_bytes: bytes.len() as u64,
                limit_bytes,
            })
        }
        _ => Ok(()),
    }
}

/// In-memory storage, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Option<Vec<u8>>,
    max_bytes: Option<u64>,
}

impl MemoryStorage {
    /// Create empty storage without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `bytes`.
    pub fn with_data(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(bytes.into()),
            max_bytes: None,
        }
    }

    /// Reject saves larger than `max_bytes`.
    pub fn with_quota(mut self, max_bytes: u64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// The currently stored bytes.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.data.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        check_quota(self.max_bytes, bytes)?;
        self.data = Some(bytes.to_vec());
        Ok(())
    }
}

/// Storage that keeps the snapshot in a JSON file inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding the snapshot file.
    data_dir: PathBuf,

    /// Optional limit on the snapshot size.
    max_bytes: Option<u64>,
}

impl FileStorage {
    /// Create file storage rooted at `data_dir`. Nothing is touched on disk
    /// until the first save.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            max_bytes: None,
        }
    }

    /// Reject saves larger than `max_bytes`.
    pub fn with_quota(mut self, max_bytes: u64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", STORAGE_KEY, SNAPSHOT_EXTENSION))
    }

    fn temp_path(&self) -> PathBuf {
        self.data_dir
            .join(format!(".{}.{}.tmp", STORAGE_KEY, SNAPSHOT_EXTENSION))
    }
}

impl StateStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        let path = self.snapshot_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| TableEditorError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Some(bytes))
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        check_quota(self.max_bytes, bytes)?;

        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                TableEditorError::DirectoryCreateError {
                    path: self.data_dir.clone(),
                    source: e,
                }
            })?;
        }

        // Write to a sibling temp file first so a failed write never leaves a
        // truncated snapshot behind.
        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes).map_err(|e| TableEditorError::FileWriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        let path = self.snapshot_path();
        fs::rename(&temp_path, &path).map_err(|e| TableEditorError::FileWriteError {
            path: path.clone(),
            source: e,
        })?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_storage_starts_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_save_replaces() {
        let mut storage = MemoryStorage::with_data(b"old".to_vec());
        storage.save(b"new").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"new"[..]));
    }

    #[test]
    fn test_memory_storage_quota() {
        let mut storage = MemoryStorage::new().with_quota(4);
        storage.save(b"1234").unwrap();

        let err = storage.save(b"12345").unwrap_err();
        assert!(matches!(
            err,
            TableEditorError::StorageQuotaExceeded {
                needed_bytes: 5,
                limit_bytes: 4
            }
        ));
        // The previous snapshot survives a rejected save.
        assert_eq!(storage.data(), Some(&b"1234"[..]));
    }

    #[test]
    fn test_file_storage_missing_file() {
        let temp = tempdir().unwrap();
        let storage = FileStorage::new(&temp.path().join("nested"));
        assert!(storage.load().unwrap().is_none());
        assert!(!storage.data_dir().exists());
    }

    #[test]
    fn test_file_storage_creates_directory_on_save() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested").join("data");
        let mut storage = FileStorage::new(&dir);

        storage.save(b"{}").unwrap();

        assert!(storage.snapshot_path().exists());
        assert!(storage.snapshot_path().ends_with("appState.json"));
        assert!(!storage.temp_path().exists());
        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_file_storage_quota_leaves_file_untouched() {
        let temp = tempdir().unwrap();
        let mut storage = FileStorage::new(temp.path()).with_quota(8);
        storage.save(b"small").unwrap();

        let err = storage.save(b"much too large").unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_QUOTA_EXCEEDED");
        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"small"[..]));
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let mut storage: Box<dyn StateStorage> = Box::new(MemoryStorage::new());
        storage.save(b"boxed").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"boxed"[..]));
    }
}
