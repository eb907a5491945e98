//! JSON patient API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, CurrentSession};
use crate::auth::require_role;
use crate::models::{Demographics, Patient, Role};

/// `POST /api/patients/:id`: full replace of the demographic fields.
/// Returns the stored record. Role is checked before the body is parsed.
pub async fn update_demographics(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
    body: Result<Json<Demographics>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    require_role(current.get(), Role::Receptionist)?;
    let Json(demographics) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let patient = ctx
        .patients
        .update_demographics(current.get(), &id, demographics)?;
    Ok(Json(patient))
}
