use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "ClinicDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the clinic front desk has always listened on.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5002";

/// Idle time after which a signed-in session is dropped: 8 hours (one shift).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 60 * 60;

/// File names inside the data directory.
pub const USERS_FILE: &str = "user.json";
pub const PATIENTS_FILE: &str = "patientData.json";

/// Data directory used when present in the working directory.
pub const LOCAL_DATABASE_DIR: &str = "database";

pub const ENV_BIND_ADDR: &str = "CLINIC_BIND_ADDR";
pub const ENV_DATA_DIR: &str = "CLINIC_DATA_DIR";
pub const ENV_PUBLIC_DIR: &str = "CLINIC_PUBLIC_DIR";
pub const ENV_SESSION_TTL_SECS: &str = "CLINIC_SESSION_TTL_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,clinic_desk_lib=debug,tower_http=info"
}

/// Get the application data directory.
/// ~/ClinicDesk/ when a home directory is known, the working directory otherwise.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default directory holding `user.json` and `patientData.json`:
/// `./database` when it exists, ~/ClinicDesk/database otherwise.
pub fn default_database_dir() -> PathBuf {
    database_dir_from(PathBuf::from(LOCAL_DATABASE_DIR))
}

fn database_dir_from(local: PathBuf) -> PathBuf {
    if local.is_dir() {
        local
    } else {
        app_data_dir().join("database")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var} value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub session_ttl: Duration,
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    /// Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: ENV_BIND_ADDR,
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let data_dir = get(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_dir);

        let public_dir = get(ENV_PUBLIC_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        let session_ttl = match get(ENV_SESSION_TTL_SECS) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: ENV_SESSION_TTL_SECS,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: ENV_SESSION_TTL_SECS,
                        value: raw,
                        reason: "must be greater than zero".into(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        Ok(Self {
            bind_addr,
            data_dir,
            public_dir,
            session_ttl,
        })
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn patients_path(&self) -> PathBuf {
        self.data_dir.join(PATIENTS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.port(), 5002);
        assert_eq!(config.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert!(config.data_dir.ends_with("database"));
    }

    #[test]
    fn local_database_dir_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join(LOCAL_DATABASE_DIR);
        std::fs::create_dir(&local).unwrap();
        assert_eq!(database_dir_from(local.clone()), local);
    }

    #[test]
    fn home_database_dir_is_the_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(LOCAL_DATABASE_DIR);
        assert_eq!(database_dir_from(missing), app_data_dir().join("database"));
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_DATA_DIR, "/srv/clinic"),
            (ENV_SESSION_TTL_SECS, "60"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.users_path(), PathBuf::from("/srv/clinic/user.json"));
        assert_eq!(config.patients_path(), PathBuf::from("/srv/clinic/patientData.json"));
        assert_eq!(config.session_ttl, Duration::from_secs(60));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "  ")])).unwrap();
        assert_eq!(config.bind_addr.port(), 5002);
    }

    #[test]
    fn invalid_bind_addr_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_BIND_ADDR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(ENV_BIND_ADDR));
    }

    #[test]
    fn zero_session_ttl_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[(ENV_SESSION_TTL_SECS, "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn app_name_is_clinic_desk() {
        assert_eq!(APP_NAME, "ClinicDesk");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
