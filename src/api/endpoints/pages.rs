//! Public pages.

use axum::response::{Html, Redirect};

use crate::api::views;

/// `GET /`: send visitors to the landing page.
pub async fn root() -> Redirect {
    Redirect::to("/home")
}

/// `GET /home`
pub async fn home() -> Html<String> {
    Html(views::home_page())
}
