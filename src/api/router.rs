//! Application router.
//!
//! Middleware stack (outermost → innermost):
//! 1. Extension(ApiContext) → 2. Session loader → 3. Audit logger
//!
//! Role checks live in the handlers and the `PatientService`, not in the
//! middleware, so public and protected routes share one stack.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the full router from a pre-constructed `ApiContext`.
///
/// Middleware uses `Extension<ApiContext>` (outermost layer); handlers use
/// `State<ApiContext>` via `with_state`. Static assets under `/public`
/// bypass the session stack.
pub fn clinic_router(ctx: ApiContext) -> Router {
    let public_dir = ctx.public_dir.clone();

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let app = Router::new()
        .route("/", get(endpoints::pages::root))
        .route("/home", get(endpoints::pages::home))
        .route("/health", get(endpoints::health::check))
        .route(
            "/signin",
            get(endpoints::auth::signin_page).post(endpoints::auth::signin),
        )
        .route("/logout", get(endpoints::auth::logout))
        // Doctor
        .route("/doctor/dashboard", get(endpoints::doctor::dashboard))
        .route("/doctor/patient/:id", get(endpoints::doctor::patient))
        .route("/doctor/patients", put(endpoints::doctor::update_clinical))
        .route(
            "/doctor/medicalrecords",
            get(endpoints::doctor::medical_records),
        )
        .route("/overview", get(endpoints::doctor::overview))
        .route(
            "/patientinformation",
            get(endpoints::doctor::patient_information),
        )
        // Receptionist
        .route(
            "/receptionist/dashboard",
            get(endpoints::receptionist::dashboard),
        )
        .route(
            "/receptionist/addpatient",
            get(endpoints::receptionist::add_patient_page)
                .post(endpoints::receptionist::add_patient),
        )
        .route(
            "/receptionist/editpatient/:id",
            get(endpoints::receptionist::edit_patient_page),
        )
        .route(
            "/receptionist/updatepatient/:id",
            post(endpoints::receptionist::update_patient),
        )
        .route(
            "/receptionist/deletepatient/:id",
            delete(endpoints::receptionist::delete_patient),
        )
        .route(
            "/api/patients/:id",
            post(endpoints::patients::update_demographics),
        )
        .with_state(ctx.clone())
        // Middleware stack (innermost first, outermost last):
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::session::load_session))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx));

    app.nest_service("/public", ServeDir::new(public_dir))
}
