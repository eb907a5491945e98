//! Shared types for the HTTP layer.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{AuthGate, Session};
use crate::models::ClinicalUpdate;
use crate::service::PatientService;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "clinic_sid";

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware.
/// Both dependencies are injected; nothing here is global.
#[derive(Clone)]
pub struct ApiContext {
    pub auth: Arc<AuthGate>,
    pub patients: Arc<PatientService>,
    pub public_dir: PathBuf,
}

impl ApiContext {
    pub fn new(auth: Arc<AuthGate>, patients: Arc<PatientService>, public_dir: PathBuf) -> Self {
        Self {
            auth,
            patients,
            public_dir,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Caller context: injected by session middleware
// ═══════════════════════════════════════════════════════════

/// The caller as resolved from the session cookie. `session` is `None`
/// for anonymous or expired callers.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub session: Option<Session>,
}

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /doctor/patients`: the target id plus any clinical fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRequest {
    pub patient_id: String,
    #[serde(flatten)]
    pub fields: ClinicalUpdate,
}

/// `{"success": .., "message": ..}` status reply used by JSON mutations.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Extract a cookie value from a `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

/// `Set-Cookie` value that installs a session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
