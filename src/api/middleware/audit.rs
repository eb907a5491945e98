//! Access logging middleware.
//!
//! Logs every request with method, path, response status and the
//! caller's role. Runs innermost, after the session has been resolved.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::CurrentSession;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let (role, user_id) = req
        .extensions()
        .get::<CurrentSession>()
        .and_then(|c| c.get())
        .map(|s| (s.role.as_str(), s.user_id.clone()))
        .unwrap_or(("anonymous", String::new()));

    let response = next.run(req).await;

    let status = response.status().as_u16();
    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, role, %user_id, "Request failed");
    } else {
        tracing::debug!(%method, %path, status, role, %user_id, "Request served");
    }

    response
}
