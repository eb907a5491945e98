//! Session cookie resolution.
//!
//! Reads the session cookie, looks the token up in the `AuthGate`, and
//! injects `CurrentSession` into request extensions. Anonymous callers
//! get an empty `CurrentSession`; role checks happen in the handlers.

use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{cookie_value, ApiContext, CurrentSession, SESSION_COOKIE};

pub async fn load_session(req: Request<axum::body::Body>, next: Next) -> Response {
    match load_session_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn load_session_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| cookie_value(v, SESSION_COOKIE))
        .map(str::to_string);

    let session = match &token {
        Some(t) => ctx.auth.resolve(t)?,
        None => None,
    };

    req.extensions_mut().insert(CurrentSession { token, session });
    Ok(next.run(req).await)
}
