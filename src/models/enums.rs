use serde::{Deserialize, Serialize};

/// Rejected string value for a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid enum value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Role {
    Doctor => "doctor",
    Receptionist => "receptionist",
});

impl Role {
    /// Landing page a freshly signed-in user is sent to.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Doctor => "/doctor/dashboard",
            Role::Receptionist => "/receptionist/dashboard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trip() {
        for (variant, s) in [(Role::Doctor, "doctor"), (Role::Receptionist, "receptionist")] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
            assert_eq!(variant.to_string(), s);
        }
    }

    #[test]
    fn role_rejects_unknown_value() {
        let err = Role::from_str("nurse").unwrap_err();
        assert_eq!(err.field, "Role");
        assert_eq!(err.value, "nurse");
    }

    #[test]
    fn role_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Receptionist).unwrap(), "\"receptionist\"");
        let role: Role = serde_json::from_str("\"doctor\"").unwrap();
        assert_eq!(role, Role::Doctor);
        assert!(serde_json::from_str::<Role>("\"Doctor\"").is_err());
    }

    #[test]
    fn dashboards_differ_by_role() {
        assert_eq!(Role::Doctor.dashboard_path(), "/doctor/dashboard");
        assert_eq!(Role::Receptionist.dashboard_path(), "/receptionist/dashboard");
    }
}
