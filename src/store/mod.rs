//! Record Store: the canonical, ordered list of application records,
//! mirrored to a single persisted JSON blob on every mutation.

pub mod blob;
pub mod records;
pub mod seed;

pub use blob::{BlobStorage, FileBlobStorage, MemoryBlobStorage};
pub use records::RecordStore;
pub use seed::SeedPolicy;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Corrupted blob under key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Non-fatal notice that the in-memory records may not survive a restart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PersistenceWarning {
    pub message: String,
}

impl PersistenceWarning {
    pub(crate) fn from_error(action: &str, err: &StoreError) -> Self {
        Self {
            message: format!(
                "Could not {action} saved applications ({err}); changes may not survive a restart"
            ),
        }
    }
}

impl std::fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
