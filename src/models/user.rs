use serde::{Deserialize, Serialize};

use super::{lenient_id, Role};

/// Staff account from `user.json`. Read-only: there is no registration flow.
///
/// The password is stored and compared as plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_with_numeric_id() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"email":"doc@clinic.test","password":"pw","role":"doctor"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.role, Role::Doctor);
    }

    #[test]
    fn rejects_unknown_role() {
        let result = serde_json::from_str::<User>(
            r#"{"id":"u1","email":"x@clinic.test","password":"pw","role":"admin"}"#,
        );
        assert!(result.is_err());
    }
}
