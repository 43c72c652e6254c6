//! Persisted key-value blobs backing the record store.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::StoreError;

/// A whole-value key-value store: every write replaces the previous blob.
pub trait BlobStorage: Send + Sync {
    /// Read the blob under `key`, `None` when nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the blob under `key`. Either the whole value lands or none of it.
    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a data directory.
pub struct FileBlobStorage {
    dir: PathBuf,
}

impl FileBlobStorage {
    /// Open (or create) the storage directory.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStorage for FileBlobStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        // Temp file in the same directory so the rename stays on one filesystem.
        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)?;
        staged.write_all(blob.as_bytes())?;
        staged.as_file().sync_all()?;
        staged
            .persist(self.path_for(key))
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

/// Volatile storage, used in tests and when no data directory is usable.
#[derive(Default)]
pub struct MemoryBlobStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. with a blob saved by an earlier session.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut blobs) = storage.blobs.lock() {
            blobs.insert(key.to_string(), blob.to_string());
        }
        storage
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let blobs = self.blobs.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut blobs = self.blobs.lock().map_err(|_| StoreError::LockPoisoned)?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

impl<T: BlobStorage + ?Sized> BlobStorage for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        (**self).write(key, blob)
    }
}
