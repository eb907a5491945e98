pub mod enums;
pub mod patient;
pub mod user;

pub use enums::{InvalidEnum, Role};
pub use patient::{ClinicalUpdate, Demographics, Patient};
pub use user::User;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a free-form field stored either as a string or as a bare
/// number/bool (hand-edited files, JSON clients sending `"age": 42`).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Same as [`lenient_string`] for required identifiers.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer)?.ok_or_else(|| D::Error::custom("identifier must not be null"))
}
