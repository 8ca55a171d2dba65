/// Internship posting endpoints
///
/// # Endpoints
///
/// - `GET /api/internships/search` - All postings, any authenticated role
/// - `GET /api/internships` - Postings owned by the calling company
/// - `POST /api/internships` - Create posting (company only)
/// - `PUT /api/internships/:id` - Update posting (owner only)
/// - `DELETE /api/internships/:id` - Delete posting (owner only)
///
/// All eight posting fields are mandatory on create and update. Ownership on
/// update/delete is enforced by the data layer's WHERE predicate: zero
/// affected rows comes back as 404 whether the posting is missing or owned
/// by another company.
use crate::{
    app::{require_role, AppState},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use internlink_shared::{
    auth::session::Identity,
    models::{
        account::Role,
        posting::{Posting, PostingInput, PostingWithCompany},
    },
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Posting create/update request
///
/// Wire names `type` and `duration` map onto the typed fields; every field
/// is mandatory but modeled as `Option` so absence surfaces as the
/// "all fields are required" error rather than a deserializer failure.
#[derive(Debug, Deserialize, Validate)]
pub struct PostingRequest {
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    /// Monthly salary; zero is accepted (unpaid posting)
    pub salary: Option<i64>,

    #[serde(rename = "type")]
    #[validate(length(max = 50, message = "Type must be at most 50 characters"))]
    pub posting_type: Option<String>,

    #[validate(length(max = 500, message = "Skills must be at most 500 characters"))]
    pub skills: Option<String>,

    #[serde(rename = "duration")]
    pub duration_weeks: Option<i32>,

    pub deadline: Option<NaiveDate>,
}

impl PostingRequest {
    /// Checks presence of all eight fields and converts to a `PostingInput`
    fn into_input(self) -> ApiResult<PostingInput> {
        let missing = || {
            ApiError::bad_request(
                "missing_fields",
                "All fields are required for internship posting",
            )
        };

        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty()).ok_or_else(missing);

        let title = non_empty(self.title)?;
        let description = non_empty(self.description)?;
        let location = non_empty(self.location)?;
        let posting_type = non_empty(self.posting_type)?;
        let skills = non_empty(self.skills)?;
        let salary = self.salary.ok_or_else(missing)?;
        let duration_weeks = self.duration_weeks.ok_or_else(missing)?;
        let deadline = self.deadline.ok_or_else(missing)?;

        if salary < 0 {
            return Err(ApiError::bad_request(
                "invalid_salary",
                "Salary must not be negative",
            ));
        }

        if duration_weeks < 1 {
            return Err(ApiError::bad_request(
                "invalid_duration",
                "Duration must be at least one week",
            ));
        }

        Ok(PostingInput {
            title,
            description,
            location,
            salary,
            posting_type,
            skills,
            duration_weeks,
            deadline,
        })
    }
}

/// `GET /api/internships/search`: browse all postings (student or company)
pub async fn search(
    State(state): State<AppState>,
    Extension(_identity): Extension<Identity>,
) -> ApiResult<Json<Vec<PostingWithCompany>>> {
    let postings = Posting::search_active(&state.db).await?;
    Ok(Json(postings))
}

/// `GET /api/internships`: postings owned by the calling company
pub async fn list_own(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Posting>>> {
    require_role(&identity, Role::Company)?;

    let postings = Posting::list_for_company(&state.db, identity.account_id).await?;
    Ok(Json(postings))
}

/// `POST /api/internships`
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<PostingRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    require_role(&identity, Role::Company)?;

    req.validate()?;
    let input = req.into_input()?;

    let posting = Posting::create(&state.db, identity.account_id, input).await?;

    tracing::info!(posting_id = %posting.id, company_id = %identity.account_id, "Internship created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": posting.id,
            "message": "Internship created successfully",
        })),
    ))
}

/// `PUT /api/internships/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(posting_id): Path<Uuid>,
    Json(req): Json<PostingRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&identity, Role::Company)?;

    req.validate()?;
    let input = req.into_input()?;

    let updated = Posting::update(&state.db, posting_id, identity.account_id, input).await?;
    if !updated {
        return Err(ApiError::not_found(
            "Internship not found or you do not have permission to edit it",
        ));
    }

    Ok(Json(
        serde_json::json!({ "message": "Internship updated successfully" }),
    ))
}

/// `DELETE /api/internships/:id`
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(posting_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_role(&identity, Role::Company)?;

    let deleted = Posting::delete(&state.db, posting_id, identity.account_id).await?;
    if !deleted {
        return Err(ApiError::not_found(
            "Internship not found or you do not have permission to delete it",
        ));
    }

    Ok(Json(
        serde_json::json!({ "message": "Internship deleted successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> PostingRequest {
        PostingRequest {
            title: Some("Backend Intern".to_string()),
            description: Some("Work on the API".to_string()),
            location: Some("Sydney".to_string()),
            salary: Some(1200),
            posting_type: Some("full-time".to_string()),
            skills: Some("Rust, SQL".to_string()),
            duration_weeks: Some(12),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 1),
        }
    }

    #[test]
    fn test_into_input_accepts_complete_request() {
        let input = full_request().into_input().unwrap();
        assert_eq!(input.title, "Backend Intern");
        assert_eq!(input.duration_weeks, 12);
    }

    #[test]
    fn test_into_input_accepts_zero_salary() {
        let mut req = full_request();
        req.salary = Some(0);
        assert!(req.into_input().is_ok());
    }

    #[test]
    fn test_into_input_rejects_missing_field() {
        let mut req = full_request();
        req.deadline = None;
        assert!(matches!(
            req.into_input(),
            Err(ApiError::BadRequest { code: "missing_fields", .. })
        ));
    }

    #[test]
    fn test_into_input_rejects_blank_field() {
        let mut req = full_request();
        req.title = Some("   ".to_string());
        assert!(matches!(
            req.into_input(),
            Err(ApiError::BadRequest { code: "missing_fields", .. })
        ));
    }

    #[test]
    fn test_into_input_rejects_negative_salary() {
        let mut req = full_request();
        req.salary = Some(-1);
        assert!(matches!(
            req.into_input(),
            Err(ApiError::BadRequest { code: "invalid_salary", .. })
        ));
    }

    #[test]
    fn test_into_input_rejects_zero_duration() {
        let mut req = full_request();
        req.duration_weeks = Some(0);
        assert!(matches!(
            req.into_input(),
            Err(ApiError::BadRequest { code: "invalid_duration", .. })
        ));
    }

    #[test]
    fn test_validator_rejects_oversized_title() {
        let mut req = full_request();
        req.title = Some("t".repeat(256));
        assert!(req.validate().is_err());
    }
}
