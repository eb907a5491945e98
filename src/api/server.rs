//! HTTP server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::clinic_router;
use crate::api::types::ApiContext;

/// Handle to a running server.
pub struct ClinicServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ClinicServer {
    /// Ask the server to stop accepting connections. In-flight requests
    /// are allowed to finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) -> Result<(), String> {
        self.task
            .await
            .map_err(|e| format!("Server task failed: {e}"))
    }
}

/// Bind `addr`, mount the router, and serve in a background task.
/// Port 0 picks an ephemeral port; the bound address is on the handle.
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<ClinicServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = clinic_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Server received shutdown signal");
        };

        tracing::info!(%addr, "Server listening");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Server error: {e}");
        }

        tracing::info!("Server stopped");
    });

    Ok(ClinicServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::auth::AuthGate;
    use crate::service::PatientService;
    use crate::store::{JsonFileStore, UserDirectory};

    fn test_ctx(dir: &tempfile::TempDir) -> ApiContext {
        let store = Arc::new(JsonFileStore::init(dir.path().join("patientData.json")).unwrap());
        let auth = Arc::new(AuthGate::new(
            UserDirectory::new(dir.path().join("user.json")),
            Duration::from_secs(60),
        ));
        ApiContext::new(
            auth,
            Arc::new(PatientService::new(store)),
            dir.path().join("public"),
        )
    }

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_serve_and_stop() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(&dir), localhost())
            .await
            .expect("server should start");
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert!(resp.status().is_success());
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");

        server.shutdown();
        tokio::time::timeout(Duration::from_secs(5), server.wait())
            .await
            .expect("server should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn protected_page_is_forbidden_without_cookie() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = start_server(test_ctx(&dir), localhost()).await.unwrap();

        let url = format!("http://{}/receptionist/dashboard", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);

        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = start_server(test_ctx(&dir), localhost()).await.unwrap();
        let second = start_server(test_ctx(&dir), first.addr).await;
        assert!(second.is_err());
        first.shutdown();
    }
}
