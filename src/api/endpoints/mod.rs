//! Route handlers, one module per area of the app.
//!
//! Handlers stay thin: resolve the caller from `CurrentSession`, call
//! `PatientService` or `AuthGate`, and render HTML or JSON.

pub mod auth;
pub mod doctor;
pub mod health;
pub mod pages;
pub mod patients;
pub mod receptionist;

use crate::api::types::CurrentSession;

/// Email of the signed-in caller for page headers.
pub(crate) fn caller_email(current: &CurrentSession) -> &str {
    current.get().map(|s| s.email.as_str()).unwrap_or("")
}
