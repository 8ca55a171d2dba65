/// Application endpoints
///
/// # Endpoints
///
/// - `POST /api/applications` - Student applies to a posting
/// - `GET /api/applications/student` - Applications submitted by the student
/// - `GET /api/applications/company` - Applications received across the
///   company's postings
/// - `PUT /api/applications/:id/status` - Company moves an application
///   through the review workflow
///
/// Duplicate applications are rejected by the composite unique constraint on
/// `(student_id, posting_id)` and mapped to `409 already_applied`, so two
/// concurrent submits cannot both land. The status update joins through
/// `postings` to prove ownership in the same statement.
use crate::{
    app::{require_role, AppState},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use internlink_shared::{
    auth::session::Identity,
    models::{
        account::Role,
        application::{
            Application, ApplicationStatus, CompanyApplicationRow, StudentApplicationRow,
        },
    },
};
use serde::Deserialize;
use uuid::Uuid;

/// Application submission request
#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    pub posting_id: Option<Uuid>,
    pub cover_letter: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: Option<String>,
}

/// `POST /api/applications`
///
/// # Errors
///
/// - `400 missing_fields`: no posting id
/// - `404`: the posting no longer exists (foreign key violation)
/// - `409 already_applied`: this student already applied to this posting
pub async fn submit(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SubmitApplicationRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    require_role(&identity, Role::Student)?;

    let posting_id = req
        .posting_id
        .ok_or_else(|| ApiError::bad_request("missing_fields", "Internship ID is required"))?;

    let cover_letter = req
        .cover_letter
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    let application =
        Application::submit(&state.db, identity.account_id, posting_id, &cover_letter).await?;

    tracing::info!(
        application_id = %application.id,
        posting_id = %posting_id,
        student_id = %identity.account_id,
        "Application submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "application_id": application.id,
            "message": "Application submitted successfully",
        })),
    ))
}

/// `GET /api/applications/student`: the student's applications, newest first
pub async fn list_for_student(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<StudentApplicationRow>>> {
    require_role(&identity, Role::Student)?;

    let rows = Application::list_for_student(&state.db, identity.account_id).await?;
    Ok(Json(rows))
}

/// `GET /api/applications/company`: applications across the company's
/// postings, newest first
pub async fn list_for_company(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<CompanyApplicationRow>>> {
    require_role(&identity, Role::Company)?;

    let rows = Application::list_for_company(&state.db, identity.account_id).await?;
    Ok(Json(rows))
}

/// `PUT /api/applications/:id/status`
///
/// Any status may move to any other status; the workflow imposes no
/// transition order.
pub async fn set_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(application_id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&identity, Role::Company)?;

    let status = req
        .status
        .as_deref()
        .and_then(ApplicationStatus::parse)
        .ok_or_else(|| {
            ApiError::bad_request(
                "invalid_status",
                "Invalid status. Must be one of: pending, shortlisted, accepted, rejected",
            )
        })?;

    let updated =
        Application::set_status(&state.db, application_id, identity.account_id, status).await?;
    if !updated {
        return Err(ApiError::not_found(
            "Application not found or you do not have permission to update it",
        ));
    }

    tracing::info!(application_id = %application_id, status = %status, "Application status changed");

    Ok(Json(
        serde_json::json!({ "message": "Application status updated successfully" }),
    ))
}
