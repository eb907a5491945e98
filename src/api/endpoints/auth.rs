//! Sign-in and sign-out.
//!
//! `GET /signin`: render the form
//! `POST /signin`: check credentials, set the session cookie, redirect by role
//! `GET /logout`: destroy the session, clear the cookie

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};

use crate::api::error::PageError;
use crate::api::types::{
    clear_session_cookie, session_cookie, ApiContext, CurrentSession, SignInForm,
};
use crate::api::views;
use crate::auth::AuthError;

pub async fn signin_page() -> Html<String> {
    Html(views::signin_page(None))
}

/// `POST /signin`: a failed attempt re-renders the form with 401.
/// Any session already attached to the request is replaced.
pub async fn signin(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    Form(form): Form<SignInForm>,
) -> Result<Response, PageError> {
    match ctx.auth.authenticate(&form.email, &form.password) {
        Ok((token, session)) => {
            if let Some(old) = current.token.as_deref() {
                ctx.auth.destroy(old)?;
            }
            Ok((
                [(header::SET_COOKIE, session_cookie(&token))],
                Redirect::to(session.role.dashboard_path()),
            )
                .into_response())
        }
        Err(AuthError::InvalidCredentials) => Ok((
            StatusCode::UNAUTHORIZED,
            Html(views::signin_page(Some("Invalid credentials"))),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Response, PageError> {
    if let Some(token) = current.token.as_deref() {
        ctx.auth.destroy(token)?;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/signin"),
    )
        .into_response())
}
