//! Patient record store.
//!
//! `RecordStore` is the only path to persisted patient data. Every
//! operation round-trips the whole collection; there is no index and no
//! partial write. Mutations go through `upsert_transaction`, `insert` and
//! `delete` so that serialization of writers happens in one place.

pub mod json_file;
pub mod users;

pub use json_file::JsonFileStore;
pub use users::UserDirectory;

use std::path::PathBuf;

use crate::models::Patient;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Store corrupt at {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Durable mapping from patient id to patient record.
///
/// Implementations keep insertion order and never hold two records with
/// the same id. The record returned by a mutation is the one persisted.
pub trait RecordStore: Send + Sync {
    /// Read the full collection.
    fn load_all(&self) -> Result<Vec<Patient>, StoreError>;

    /// Overwrite the full collection.
    fn save_all(&self, patients: &[Patient]) -> Result<(), StoreError>;

    fn find_by_id(&self, id: &str) -> Result<Option<Patient>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|p| p.id == id))
    }

    /// Load, replace the record `id` with `mutator(record)`, store.
    /// The replacement keeps the original id whatever the mutator returns.
    fn upsert_transaction(
        &self,
        id: &str,
        mutator: &mut dyn FnMut(Patient) -> Patient,
    ) -> Result<Patient, StoreError>;

    /// Append a new record. Fails with `DuplicateId` if the id is taken.
    fn insert(&self, record: Patient) -> Result<(), StoreError>;

    /// Remove the record `id`. Returns whether a record was removed;
    /// nothing is written when it was not.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
