//! Read-only staff directory backed by `user.json`.
//!
//! The file is re-read on every lookup so edits to the staff list take
//! effect without a restart.

use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;

use super::StoreError;
use crate::models::User;

pub struct UserDirectory {
    path: PathBuf,
}

impl UserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<User>, StoreError> {
        let data = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Find the user whose email and password both match exactly.
    pub fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self.load()?.into_iter().find(|user| {
            user.email == email && bool::from(user.password.as_bytes().ct_eq(password.as_bytes()))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn write_users(dir: &tempfile::TempDir) -> UserDirectory {
        let path = dir.path().join("user.json");
        std::fs::write(
            &path,
            r#"[
  {"id": "1", "email": "doctor@clinic.test", "password": "doc-pass", "role": "doctor"},
  {"id": "2", "email": "desk@clinic.test", "password": "desk-pass", "role": "receptionist"}
]"#,
        )
        .unwrap();
        UserDirectory::new(path)
    }

    #[test]
    fn matching_credentials_return_user() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_users(&dir);
        let user = users
            .find_by_credentials("desk@clinic.test", "desk-pass")
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "2");
        assert_eq!(user.role, Role::Receptionist);
    }

    #[test]
    fn wrong_password_or_email_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let users = write_users(&dir);
        assert!(users.find_by_credentials("desk@clinic.test", "doc-pass").unwrap().is_none());
        assert!(users.find_by_credentials("DESK@clinic.test", "desk-pass").unwrap().is_none());
        assert!(users.find_by_credentials("desk@clinic.test", "desk-pas").unwrap().is_none());
        assert!(users.find_by_credentials("", "").unwrap().is_none());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let users = UserDirectory::new(dir.path().join("user.json"));
        assert!(matches!(users.load(), Err(StoreError::Unavailable { .. })));
    }

    #[test]
    fn malformed_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        std::fs::write(&path, "not json").unwrap();
        let users = UserDirectory::new(path);
        assert!(matches!(users.load(), Err(StoreError::Corrupt { .. })));
    }
}
