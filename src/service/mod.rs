//! Business operations on patients, each gated by the caller's role.

pub mod patients;

pub use patients::PatientService;

use crate::auth::AuthError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Access denied")]
    AccessDenied,
    #[error("Patient not found: {0}")]
    NotFound(String),
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Store(other),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Directory(e) => ServiceError::Store(e),
            AuthError::InvalidCredentials | AuthError::AccessDenied => ServiceError::AccessDenied,
            AuthError::LockPoisoned => ServiceError::Store(StoreError::LockPoisoned),
        }
    }
}
