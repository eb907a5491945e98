//! Patient service.
//!
//! Receptionists own registration, demographics and removal; doctors own
//! clinical data. Both roles may list the queue. Every operation checks the
//! caller's session first and touches the store only through `RecordStore`.

use std::sync::Arc;

use uuid::Uuid;

use super::ServiceError;
use crate::auth::{require_any_role, require_role, Session};
use crate::models::{ClinicalUpdate, Demographics, Patient, Role};
use crate::store::{RecordStore, StoreError};

/// Attempts at drawing a fresh id before giving up on a colliding insert.
const MAX_ID_ATTEMPTS: usize = 3;

pub struct PatientService {
    store: Arc<dyn RecordStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Full collection in store order. Doctor or receptionist.
    pub fn list_patients(&self, session: Option<&Session>) -> Result<Vec<Patient>, ServiceError> {
        require_any_role(session, &[Role::Doctor, Role::Receptionist])?;
        Ok(self.store.load_all()?)
    }

    /// One record for the doctor's patient view.
    pub fn get_patient(&self, session: Option<&Session>, id: &str) -> Result<Patient, ServiceError> {
        require_role(session, Role::Doctor)?;
        self.find(id)
    }

    /// One record for the front-desk edit form.
    pub fn get_patient_for_edit(
        &self,
        session: Option<&Session>,
        id: &str,
    ) -> Result<Patient, ServiceError> {
        require_role(session, Role::Receptionist)?;
        self.find(id)
    }

    /// Merge the supplied clinical fields into the record. Doctor only.
    pub fn record_clinical_data(
        &self,
        session: Option<&Session>,
        id: &str,
        update: ClinicalUpdate,
    ) -> Result<Patient, ServiceError> {
        let caller = require_role(session, Role::Doctor)?;
        let mut update = Some(update);
        let patient = self.store.upsert_transaction(id, &mut |mut p| {
            if let Some(update) = update.take() {
                p.merge_clinical(update);
            }
            p
        })?;
        tracing::info!(patient_id = %id, by = %caller.user_id, "Clinical data recorded");
        Ok(patient)
    }

    /// Register a new patient with a freshly generated id. Receptionist only.
    pub fn create_patient(
        &self,
        session: Option<&Session>,
        demographics: Demographics,
    ) -> Result<Patient, ServiceError> {
        let caller = require_role(session, Role::Receptionist)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let patient = Patient::new(Uuid::new_v4().to_string(), demographics.clone());
            match self.store.insert(patient.clone()) {
                Ok(()) => {
                    tracing::info!(patient_id = %patient.id, by = %caller.user_id, "Patient registered");
                    return Ok(patient);
                }
                Err(StoreError::DuplicateId(id)) if attempt < MAX_ID_ATTEMPTS => {
                    tracing::warn!(patient_id = %id, "Generated id collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Overwrite the demographic field set of a record. Fields missing from
    /// `demographics` are cleared. Receptionist only.
    pub fn update_demographics(
        &self,
        session: Option<&Session>,
        id: &str,
        demographics: Demographics,
    ) -> Result<Patient, ServiceError> {
        let caller = require_role(session, Role::Receptionist)?;
        let mut demographics = Some(demographics);
        let patient = self.store.upsert_transaction(id, &mut |mut p| {
            if let Some(d) = demographics.take() {
                p.replace_demographics(d);
            }
            p
        })?;
        tracing::info!(patient_id = %id, by = %caller.user_id, "Demographics replaced");
        Ok(patient)
    }

    /// Remove a record. Receptionist only.
    pub fn delete_patient(&self, session: Option<&Session>, id: &str) -> Result<(), ServiceError> {
        let caller = require_role(session, Role::Receptionist)?;
        if !self.store.delete(id)? {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        tracing::info!(patient_id = %id, by = %caller.user_id, "Patient deleted");
        Ok(())
    }

    fn find(&self, id: &str) -> Result<Patient, ServiceError> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }
}
