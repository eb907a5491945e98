//! HTTP error types.
//!
//! `ApiError` renders as JSON for machine-facing routes; `PageError`
//! wraps the same error and renders an HTML error page for browser routes.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::views;
use crate::auth::AuthError;
use crate::service::ServiceError;
use crate::store::StoreError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Access denied")]
    AccessDenied,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status, machine code and client-facing message. Internal details
    /// are logged here and never sent to the client.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            ApiError::AccessDenied => (
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                "Access Denied".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Internal Server Error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ErrorBody {
            success: false,
            code,
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Browser-facing wrapper: same mapping, HTML body.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, _code, message) = self.0.parts();
        (status, Html(views::error_page(&message))).into_response()
    }
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl From<ServiceError> for PageError {
    fn from(err: ServiceError) -> Self {
        PageError(err.into())
    }
}

impl From<AuthError> for PageError {
    fn from(err: AuthError) -> Self {
        PageError(err.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AccessDenied => ApiError::AccessDenied,
            ServiceError::NotFound(_) => ApiError::NotFound("Patient not found".into()),
            ServiceError::Store(e) => ApiError::from(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::AccessDenied => ApiError::AccessDenied,
            AuthError::Directory(e) => ApiError::from(e),
            AuthError::LockPoisoned => ApiError::Internal("session lock poisoned".into()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Patient not found".into()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn json_of(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn access_denied_returns_403() {
        let response = ApiError::AccessDenied.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = json_of(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "ACCESS_DENIED");
    }

    #[tokio::test]
    async fn not_found_returns_404_with_message() {
        let response = ApiError::NotFound("Patient not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_of(response).await;
        assert_eq!(json["message"], "Patient not found");
    }

    #[tokio::test]
    async fn invalid_credentials_returns_401() {
        let response = ApiError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("disk on fire at /var/db".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_of(response).await;
        assert_eq!(json["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn page_error_renders_html_with_same_status() {
        let response = PageError(ApiError::NotFound("Patient not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 65536).await.unwrap();
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Patient not found"));
    }

    #[test]
    fn store_failures_map_to_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from(ServiceError::Store(StoreError::Unavailable {
            path: "/tmp/x.json".into(),
            source: io,
        }));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn service_not_found_maps_to_404() {
        let err = ApiError::from(ServiceError::NotFound("p-1".into()));
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn auth_errors_map_to_distinct_statuses() {
        assert!(matches!(ApiError::from(AuthError::InvalidCredentials), ApiError::InvalidCredentials));
        assert!(matches!(ApiError::from(AuthError::AccessDenied), ApiError::AccessDenied));
    }
}
