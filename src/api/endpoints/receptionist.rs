//! Front-desk pages: register, edit and delete patients.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::{Extension, Form, Json};

use super::caller_email;
use crate::api::error::{ApiError, PageError};
use crate::api::types::{ApiContext, CurrentSession, StatusResponse};
use crate::api::views;
use crate::auth::require_role;
use crate::models::{Demographics, Role};

pub async fn dashboard(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, PageError> {
    require_role(current.get(), Role::Receptionist)?;
    let patients = ctx.patients.list_patients(current.get())?;
    Ok(Html(views::receptionist_dashboard(caller_email(&current), &patients)))
}

pub async fn add_patient_page(
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, PageError> {
    require_role(current.get(), Role::Receptionist)?;
    Ok(Html(views::add_patient(caller_email(&current))))
}

/// `POST /receptionist/addpatient`: back to a blank form for the next arrival.
pub async fn add_patient(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    body: Result<Form<Demographics>, FormRejection>,
) -> Result<Redirect, PageError> {
    require_role(current.get(), Role::Receptionist)?;
    let Form(demographics) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    ctx.patients.create_patient(current.get(), demographics)?;
    Ok(Redirect::to("/receptionist/addpatient"))
}

pub async fn edit_patient_page(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let patient = ctx.patients.get_patient_for_edit(current.get(), &id)?;
    Ok(Html(views::edit_patient(caller_email(&current), &patient)))
}

/// `POST /receptionist/updatepatient/:id`: replaces all demographics.
pub async fn update_patient(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
    body: Result<Form<Demographics>, FormRejection>,
) -> Result<Redirect, PageError> {
    require_role(current.get(), Role::Receptionist)?;
    let Form(demographics) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    ctx.patients
        .update_demographics(current.get(), &id, demographics)?;
    Ok(Redirect::to("/receptionist/dashboard"))
}

/// `DELETE /receptionist/deletepatient/:id`
pub async fn delete_patient(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.patients.delete_patient(current.get(), &id)?;
    Ok(Json(StatusResponse::ok("Patient deleted successfully")))
}
