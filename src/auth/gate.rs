use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::session::{Session, SessionStore};
use super::AuthError;
use crate::models::Role;
use crate::store::UserDirectory;

/// Owns the session table and the staff directory.
///
/// Nothing outside the gate mutates a session; callers get clones.
pub struct AuthGate {
    users: UserDirectory,
    sessions: Mutex<SessionStore>,
}

impl AuthGate {
    pub fn new(users: UserDirectory, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions: Mutex::new(SessionStore::new(session_ttl)),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, SessionStore>, AuthError> {
        self.sessions.lock().map_err(|_| AuthError::LockPoisoned)
    }

    /// Check `email`/`password` against the staff directory and open a
    /// session. Returns the session token alongside the session.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<(String, Session), AuthError> {
        let user = self
            .users
            .find_by_credentials(email, password)?
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::for_user(&user);
        let mut sessions = self.sessions()?;
        let token = sessions.create(session.clone());
        tracing::info!(
            user_id = %session.user_id,
            role = %session.role,
            active_sessions = sessions.active_count(),
            "Signed in"
        );
        Ok((token, session))
    }

    /// Resolve a session token. Unknown or expired tokens yield `None`.
    pub fn resolve(&self, token: &str) -> Result<Option<Session>, AuthError> {
        Ok(self.sessions()?.get(token))
    }

    /// Invalidate the session for `token`. Safe to call repeatedly.
    pub fn destroy(&self, token: &str) -> Result<(), AuthError> {
        if let Some(session) = self.sessions()?.remove(token) {
            tracing::info!(
                user_id = %session.user_id,
                minutes = session.minutes_signed_in(chrono::Utc::now()),
                "Signed out"
            );
        }
        Ok(())
    }
}

/// Require a session whose role is exactly `role`.
pub fn require_role(session: Option<&Session>, role: Role) -> Result<&Session, AuthError> {
    require_any_role(session, &[role])
}

/// Require a session whose role is one of `roles`.
pub fn require_any_role<'a>(
    session: Option<&'a Session>,
    roles: &[Role],
) -> Result<&'a Session, AuthError> {
    match session {
        Some(s) if roles.contains(&s.role) => Ok(s),
        Some(s) => {
            tracing::warn!(user_id = %s.user_id, role = %s.role, "Access denied: role mismatch");
            Err(AuthError::AccessDenied)
        }
        None => Err(AuthError::AccessDenied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const USERS: &str = r#"[
  {"id": "1", "email": "doctor@clinic.test", "password": "doc-pass", "role": "doctor"},
  {"id": "2", "email": "desk@clinic.test", "password": "desk-pass", "role": "receptionist"}
]"#;

    fn test_gate() -> (AuthGate, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        std::fs::write(&path, USERS).unwrap();
        (AuthGate::new(UserDirectory::new(path), Duration::from_secs(60)), dir)
    }

    fn session(role: Role) -> Session {
        Session {
            user_id: "u".into(),
            email: "u@clinic.test".into(),
            role,
            signed_in_at: Utc::now(),
        }
    }

    #[test]
    fn authenticate_returns_stored_role() {
        let (gate, _dir) = test_gate();
        for (email, password, role) in [
            ("doctor@clinic.test", "doc-pass", Role::Doctor),
            ("desk@clinic.test", "desk-pass", Role::Receptionist),
        ] {
            let (token, session) = gate.authenticate(email, password).unwrap();
            assert_eq!(session.role, role);
            assert_eq!(session.email, email);
            assert_eq!(gate.resolve(&token).unwrap(), Some(session));
        }
    }

    #[test]
    fn authenticate_rejects_non_matching_pairs() {
        let (gate, _dir) = test_gate();
        for (email, password) in [
            ("doctor@clinic.test", "desk-pass"),
            ("desk@clinic.test", "doc-pass"),
            ("nobody@clinic.test", "doc-pass"),
            ("doctor@clinic.test", ""),
        ] {
            assert!(matches!(
                gate.authenticate(email, password),
                Err(AuthError::InvalidCredentials)
            ));
        }
    }

    #[test]
    fn authenticate_surfaces_directory_failure() {
        let dir = tempfile::tempdir().unwrap();
        let gate = AuthGate::new(
            UserDirectory::new(dir.path().join("missing.json")),
            Duration::from_secs(60),
        );
        assert!(matches!(
            gate.authenticate("a", "b"),
            Err(AuthError::Directory(_))
        ));
    }

    #[test]
    fn destroy_invalidates_and_is_idempotent() {
        let (gate, _dir) = test_gate();
        let (token, _) = gate.authenticate("doctor@clinic.test", "doc-pass").unwrap();
        gate.destroy(&token).unwrap();
        gate.destroy(&token).unwrap();
        assert_eq!(gate.resolve(&token).unwrap(), None);
    }

    #[test]
    fn require_role_denies_every_mismatch() {
        for held in [Role::Doctor, Role::Receptionist] {
            for required in [Role::Doctor, Role::Receptionist] {
                let s = session(held);
                let result = require_role(Some(&s), required);
                assert_eq!(result.is_ok(), held == required, "{held} vs {required}");
            }
        }
    }

    #[test]
    fn require_role_denies_missing_session() {
        assert!(matches!(
            require_role(None, Role::Doctor),
            Err(AuthError::AccessDenied)
        ));
        assert!(matches!(
            require_any_role(None, &[Role::Doctor, Role::Receptionist]),
            Err(AuthError::AccessDenied)
        ));
    }

    #[test]
    fn require_any_role_accepts_listed_roles() {
        let both = [Role::Doctor, Role::Receptionist];
        assert!(require_any_role(Some(&session(Role::Doctor)), &both).is_ok());
        assert!(require_any_role(Some(&session(Role::Receptionist)), &both).is_ok());
        assert!(require_any_role(Some(&session(Role::Receptionist)), &[Role::Doctor]).is_err());
    }
}
