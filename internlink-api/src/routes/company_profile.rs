/// Company profile endpoints
///
/// Company counterpart of `student_profile`: same lifecycle, same verified
/// password-change flow, company-specific field predicates.
///
/// # Endpoints
///
/// - `GET /api/company-profile`
/// - `PUT /api/company-profile`
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
        company_profile::{CompanyProfile, CompanyProfileDetails, UpsertCompanyProfile},
    },
    validation,
};
use serde::Deserialize;

/// Profile update request
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

/// `GET /api/company-profile`
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<CompanyProfileDetails>> {
    require_role(&identity, Role::Company)?;

    let details = CompanyProfile::details(&state.db, identity.account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Company profile not found"))?;

    Ok(Json(details))
}

/// `PUT /api/company-profile`
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateCompanyProfileRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&identity, Role::Company)?;

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

    if !validation::is_valid_company_name(req.company_name.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_company_name",
            "Company name should contain only letters, numbers, spaces, ampersands, dots, and hyphens (2-100 characters)",
        ));
    }

    if !validation::is_valid_phone(req.phone.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_phone",
            "Phone number should contain 7-20 digits, spaces, hyphens, parentheses, or a leading plus sign",
        ));
    }

    if !validation::is_valid_website(req.website.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_website",
            "Website must be a valid URL starting with http:// or https://",
        ));
    }

    if !validation::is_valid_location(req.location.as_deref()) {
        return Err(ApiError::bad_request(
            "invalid_location",
            "Location should contain only letters, spaces, commas, dots, and hyphens (2-100 characters)",
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

    CompanyProfile::upsert(
        &state.db,
        identity.account_id,
        UpsertCompanyProfile {
            company_name: validation::clean_optional(req.company_name.as_deref()),
            phone: validation::clean_optional(req.phone.as_deref()),
            website: validation::clean_optional(req.website.as_deref()),
            location: validation::clean_optional(req.location.as_deref()),
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
