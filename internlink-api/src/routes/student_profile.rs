/// Student profile endpoints
///
/// # Endpoints
///
/// - `GET /api/student-profile` - Merged account + profile fields
/// - `PUT /api/student-profile` - Update account identity, profile fields,
///   and optionally the password (verified change flow)
///
/// Both endpoints require a student session. Every field predicate is a pure
/// function from the `validation` module; all validation happens before any
/// write.
use crate::{
    app::{require_role, AppState},
    error::{ApiError, ApiResult},
    routes::auth::{process_password_change, required},
};
use axum::{extract::State, Extension, Json};
use internlink_shared::{
    auth::session::Identity,
    models::{
        account::{Account, Role},
        student_profile::{StudentProfile, StudentProfileDetails, UpsertStudentProfile},
    },
    validation,
};
use serde::Deserialize;

/// Profile update request
///
/// `full_name` and `email` are mandatory; the rest are optional and empty
/// strings are treated as "unset". The three password fields travel together
/// when a password change is requested.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// `GET /api/student-profile`
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<StudentProfileDetails>> {
    require_role(&identity, Role::Student)?;

    let details = StudentProfile::details(&state.db, identity.account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student profile not found"))?;

    Ok(Json(details))
}

/// `PUT /api/student-profile`
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateStudentProfileRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&identity, Role::Student)?;

    let (full_name, email) = match (required(&req.full_name), required(&req.email)) {
        (Some(n), Some(e)) => (n, e),
        _ => {
            return Err(ApiError::bad_request(
                "missing_fields",
                "Full name and email are required",
            ))
        }
    };

    if !validation::is_valid_name(full_name) {
        return Err(ApiError::bad_request(
            "invalid_name",
            "Full name should contain only letters and spaces (2-50 characters)",
        ));
    }

    if !validation::is_valid_email(email) {
        return Err(ApiError::bad_request(
            "invalid_email",
            "Please enter a valid email address",
        ));
    }

    if !validation::is_valid_university(req.university.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_university",
            "University name should contain only letters, spaces, dots, and hyphens (2-100 characters)",
        ));
    }

    if !validation::is_valid_major(req.major.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_major",
            "Major should contain only letters, spaces, ampersands, and hyphens (2-100 characters)",
        ));
    }

    if !validation::is_valid_graduation_year(req.graduation_year) {
        return Err(ApiError::bad_request(
            "invalid_graduation_year",
            "Graduation year must be between 2020 and 2035",
        ));
    }

    if !validation::is_valid_skills(req.skills.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_skills",
            "Skills should contain only letters, numbers, spaces, commas, dots, plus signs, hashes, and hyphens (2-500 characters)",
        ));
    }

    if !validation::is_valid_description(req.description.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_description",
            "Description should not exceed 1000 characters",
        ));
    }

    let new_password_hash = process_password_change(
        &state,
        identity.account_id,
        required(&req.current_password),
        required(&req.new_password),
        required(&req.confirm_password),
    )
    .await?;

    let updated = Account::update_identity(
        &state.db,
        identity.account_id,
        full_name.trim(),
        &email.trim().to_lowercase(),
    )
    .await?;
    if !updated {
        return Err(ApiError::not_found("User not found"));
    }

    StudentProfile::upsert(
        &state.db,
        identity.account_id,
        UpsertStudentProfile {
            university: validation::clean_optional(req.university.as_deref()),
            major: validation::clean_optional(req.major.as_deref()),
            graduation_year: req.graduation_year,
            skills: validation::clean_optional(req.skills.as_deref()),
            description: validation::clean_optional(req.description.as_deref()),
        },
    )
    .await?;

    if let Some(hash) = new_password_hash {
        Account::update_password(&state.db, identity.account_id, &hash).await?;
        tracing::info!(account_id = %identity.account_id, "Password changed");
    }

    Ok(Json(
        serde_json::json!({ "message": "Profile updated successfully" }),
    ))
}
