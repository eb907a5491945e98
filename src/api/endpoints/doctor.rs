//! Doctor pages and the clinical-data update.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::{Extension, Json};

use super::caller_email;
use crate::api::error::{ApiError, PageError};
use crate::api::types::{ApiContext, ClinicalRequest, CurrentSession, StatusResponse};
use crate::api::views;
use crate::auth::require_role;
use crate::models::Role;

/// `GET /doctor/dashboard`: the patient queue.
pub async fn dashboard(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, PageError> {
    require_role(current.get(), Role::Doctor)?;
    let patients = ctx.patients.list_patients(current.get())?;
    Ok(Html(views::doctor_dashboard(caller_email(&current), &patients)))
}

/// `GET /doctor/patient/:id`
pub async fn patient(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let patient = ctx.patients.get_patient(current.get(), &id)?;
    Ok(Html(views::patient_info(caller_email(&current), &patient)))
}

/// `PUT /doctor/patients`: merge clinical fields into the record named by
/// `patientId`. Fields absent from the body are left as stored.
///
/// The role is checked before the body is looked at, so callers without
/// access get 403 whatever they send.
pub async fn update_clinical(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
    body: Result<Json<ClinicalRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    require_role(current.get(), Role::Doctor)?;
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if request.patient_id.trim().is_empty() {
        return Err(ApiError::BadRequest("patientId is required".into()));
    }
    if request.fields.is_empty() {
        return Err(ApiError::BadRequest("No clinical fields supplied".into()));
    }
    ctx.patients
        .record_clinical_data(current.get(), &request.patient_id, request.fields)?;
    Ok(Json(StatusResponse::ok("Patient data updated successfully")))
}

/// `GET /doctor/medicalrecords`
pub async fn medical_records(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, PageError> {
    require_role(current.get(), Role::Doctor)?;
    let patients = ctx.patients.list_patients(current.get())?;
    Ok(Html(views::medical_records(caller_email(&current), &patients)))
}

/// `GET /overview`
pub async fn overview(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, PageError> {
    require_role(current.get(), Role::Doctor)?;
    let patients = ctx.patients.list_patients(current.get())?;
    Ok(Html(views::overview(caller_email(&current), &patients)))
}

/// `GET /patientinformation`
pub async fn patient_information(
    State(ctx): State<ApiContext>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, PageError> {
    require_role(current.get(), Role::Doctor)?;
    let patients = ctx.patients.list_patients(current.get())?;
    Ok(Html(views::patient_lookup(caller_email(&current), &patients)))
}
