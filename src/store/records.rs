use chrono::Utc;

use super::{BlobStorage, PersistenceWarning, SeedPolicy, StoreError};
use crate::config;
use crate::models::{ApplicationRecord, ApplicationStatus};

/// Owns the ordered application list (most recent first).
///
/// The in-memory list is authoritative. Storage failures never surface as
/// errors from the mutating calls; they leave a [`PersistenceWarning`]
/// behind instead, cleared by the next successful write or load.
pub struct RecordStore {
    storage: Box<dyn BlobStorage>,
    key: String,
    seed: SeedPolicy,
    records: Vec<ApplicationRecord>,
    warning: Option<PersistenceWarning>,
}

impl RecordStore {
    /// Open the store under the default key and load it.
    pub fn open(storage: impl BlobStorage + 'static, seed: SeedPolicy) -> Self {
        Self::open_with_key(storage, config::STORAGE_KEY, seed)
    }

    pub fn open_with_key(storage: impl BlobStorage + 'static, key: &str, seed: SeedPolicy) -> Self {
        let mut store = Self {
            storage: Box::new(storage),
            key: key.to_string(),
            seed,
            records: Vec::new(),
            warning: None,
        };
        store.load();
        store
    }

    /// Re-read the persisted blob.
    ///
    /// With no blob yet, seeds per the [`SeedPolicy`] and writes the seed back.
    /// A blob that cannot be read or parsed leaves the in-memory list untouched.
    pub fn load(&mut self) -> &[ApplicationRecord] {
        match self.read_blob() {
            Ok(Some(records)) => {
                self.records = records;
                self.warning = None;
            }
            Ok(None) => {
                if self.records.is_empty() {
                    self.records = self.seed.records(Utc::now());
                    tracing::info!(count = self.records.len(), "No saved applications, seeded store");
                }
                if !self.records.is_empty() {
                    self.persist();
                }
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to load saved applications: {e}");
                self.warning = Some(PersistenceWarning::from_error("load", &e));
            }
        }
        &self.records
    }

    /// Prepend a record and persist the whole list.
    pub fn append(&mut self, record: ApplicationRecord) -> &[ApplicationRecord] {
        self.records.insert(0, record);
        self.persist();
        &self.records
    }

    /// Replace the status of the record whose id matches exactly.
    ///
    /// No-op (and no write) when nothing matches.
    pub fn update_status(&mut self, id: &str, status: ApplicationStatus) -> &[ApplicationRecord] {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            tracing::debug!(id, "Status update for unknown application ignored");
            return &self.records;
        };
        let updated = self.records[pos].with_status(status);
        self.records[pos] = updated;
        self.persist();
        &self.records
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn find_exact(&self, id: &str) -> Option<&ApplicationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_exact(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set when the last load or write failed.
    pub fn persistence_warning(&self) -> Option<&PersistenceWarning> {
        self.warning.as_ref()
    }

    fn read_blob(&self) -> Result<Option<Vec<ApplicationRecord>>, StoreError> {
        let Some(blob) = self.storage.read(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&blob)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: self.key.clone(),
                reason: e.to_string(),
            })
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.records)
            .map_err(StoreError::from)
            .and_then(|blob| self.storage.write(&self.key, &blob));
        match result {
            Ok(()) => self.warning = None,
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to persist applications: {e}");
                self.warning = Some(PersistenceWarning::from_error("save", &e));
            }
        }
    }
}
