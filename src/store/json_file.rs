//! `RecordStore` backed by a single pretty-printed JSON array on disk.
//!
//! Writes land in a temp file next to the store and are renamed over it,
//! so a failed write leaves the previous content intact. All
//! load → mutate → save cycles of one store run under its write lock.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use super::{RecordStore, StoreError};
use crate::models::Patient;

pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store, creating its directory and an empty collection
    /// when the file does not exist yet.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        if !store.path.exists() {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Unavailable {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            store.write_file(&[])?;
            tracing::info!(path = %store.path.display(), "Created empty patient store");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn read_file(&self) -> Result<Vec<Patient>, StoreError> {
        let data = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_file(&self, patients: &[Patient]) -> Result<(), StoreError> {
        let unavailable = |source: std::io::Error| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(patients).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(unavailable)?;
        staged.write_all(json.as_bytes()).map_err(unavailable)?;
        staged.as_file().sync_all().map_err(unavailable)?;
        staged
            .persist(&self.path)
            .map_err(|e| unavailable(e.error))?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<Patient>, StoreError> {
        self.read_file()
    }

    fn save_all(&self, patients: &[Patient]) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        self.write_file(patients)
    }

    fn upsert_transaction(
        &self,
        id: &str,
        mutator: &mut dyn FnMut(Patient) -> Patient,
    ) -> Result<Patient, StoreError> {
        let _guard = self.lock()?;
        let mut patients = self.read_file()?;
        let index = patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let current = patients[index].clone();
        let mut replacement = mutator(current);
        replacement.id = id.to_string();
        patients[index] = replacement.clone();

        self.write_file(&patients)?;
        tracing::debug!(patient_id = %id, "Patient record replaced");
        Ok(replacement)
    }

    fn insert(&self, record: Patient) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut patients = self.read_file()?;
        if patients.iter().any(|p| p.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        let id = record.id.clone();
        patients.push(record);
        self.write_file(&patients)?;
        tracing::debug!(patient_id = %id, total = patients.len(), "Patient record inserted");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let mut patients = self.read_file()?;
        let before = patients.len();
        patients.retain(|p| p.id != id);
        if patients.len() == before {
            return Ok(false);
        }
        self.write_file(&patients)?;
        tracing::debug!(patient_id = %id, "Patient record deleted");
        Ok(true)
    }
}
