pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ApiContext;
use crate::auth::AuthGate;
use crate::config::AppConfig;
use crate::service::PatientService;
use crate::store::{JsonFileStore, StoreError, UserDirectory};

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Server(String),
}

/// Wire the stores, auth gate and service into an `ApiContext`.
pub fn build_context(config: &AppConfig) -> Result<ApiContext, StartupError> {
    let store = Arc::new(JsonFileStore::init(config.patients_path())?);

    let users = UserDirectory::new(config.users_path());
    match users.load() {
        Ok(list) => tracing::info!(
            path = %users.path().display(),
            count = list.len(),
            "Staff directory loaded"
        ),
        Err(e) => tracing::warn!(
            path = %users.path().display(),
            error = %e,
            "Staff directory unreadable; sign-in will fail until it is fixed"
        ),
    }

    let auth = Arc::new(AuthGate::new(users, config.session_ttl));
    let patients = Arc::new(PatientService::new(store));
    Ok(ApiContext::new(auth, patients, config.public_dir.clone()))
}

/// Start the server and run until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        public_dir = %config.public_dir.display(),
        ttl_secs = config.session_ttl.as_secs(),
        "Configuration loaded"
    );

    let ctx = build_context(&config)?;
    let mut server = api::start_server(ctx, config.bind_addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!(addr = %server.addr, "Server is running");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.wait().await.map_err(StartupError::Server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::store::RecordStore;

    fn config_for(dir: &tempfile::TempDir) -> AppConfig {
        let vars: HashMap<&str, String> = HashMap::from([
            (config::ENV_DATA_DIR, dir.path().join("db").display().to_string()),
            (config::ENV_BIND_ADDR, "127.0.0.1:0".to_string()),
        ]);
        AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap()
    }

    #[test]
    fn build_context_creates_an_empty_patient_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        build_context(&config).unwrap();

        let store = JsonFileStore::new(config.patients_path());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn missing_staff_directory_does_not_block_startup() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        assert!(!config.users_path().exists());
        let ctx = build_context(&config).unwrap();
        assert!(ctx.auth.authenticate("a@b", "c").is_err());
    }
}
