//! Session/auth gate: who is calling, and in what role.

pub mod gate;
pub mod session;

pub use gate::{require_any_role, require_role, AuthGate};
pub use session::{Session, SessionStore};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Access denied")]
    AccessDenied,
    #[error("User directory error: {0}")]
    Directory(#[from] StoreError),
    #[error("Session lock poisoned")]
    LockPoisoned,
}
