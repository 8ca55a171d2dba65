/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code and a JSON body of the shape
/// `{"error": code, "message": text, "details": [...]}`.
///
/// The taxonomy mirrors the access-control design: an update or delete that
/// affects zero rows is reported as `NotFound` whether the resource is
/// missing or owned by someone else, so the API never reveals the existence
/// of resources the caller cannot touch.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// No authenticated session, or credentials rejected (401)
    ///
    /// `code` distinguishes the login failure modes (`email_not_found`,
    /// `password_not_found`, `not_student_account`, `not_company_account`)
    /// so clients can show a targeted message.
    Unauthenticated { code: &'static str, message: String },

    /// Session role does not match the role the endpoint requires (403)
    Forbidden(String),

    /// Missing resource, including disguised "not owned" (404)
    NotFound(String),

    /// Malformed or missing input (400), with a machine-readable code
    BadRequest { code: &'static str, message: String },

    /// Uniqueness conflict (409): duplicate email or duplicate application
    Conflict { code: &'static str, message: String },

    /// Field-level validation failures (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500), logged with a generic message returned
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "unauthenticated", "email_exists")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// Plain 401 for requests with no valid session
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated {
            code: "unauthenticated",
            message: message.into(),
        }
    }

    /// 401 with a specific failure code (login flow)
    pub fn login_failure(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Unauthenticated {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated { message, .. } => {
                write!(f, "Unauthenticated: {}", message)
            }
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest { message, .. } => write!(f, "Bad request: {}", message),
            ApiError::Conflict { message, .. } => write!(f, "Conflict: {}", message),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Unauthenticated { code, message } => {
                (StatusCode::UNAUTHORIZED, code, message, None)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code, message, None)
            }
            ApiError::Conflict { code, message } => (StatusCode::CONFLICT, code, message, None),
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique-constraint violations carry the intent of the write: the email
/// constraint means a duplicate signup, the composite application constraint
/// means a double submit. Foreign-key violations mean the referenced row
/// (e.g. the posting being applied to) does not exist.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found("Resource not found"),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().unwrap_or_default();
                    if constraint.contains("email") {
                        return ApiError::conflict("email_exists", "Email already exists");
                    }
                    if constraint.contains("student_id_posting_id") {
                        return ApiError::conflict(
                            "already_applied",
                            "You have already applied to this internship",
                        );
                    }
                    return ApiError::conflict(
                        "conflict",
                        format!("Constraint violation: {}", constraint),
                    );
                }

                if db_err.is_foreign_key_violation() {
                    return ApiError::not_found("Referenced resource not found");
                }

                ApiError::internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password hashing errors to API errors
impl From<internlink_shared::auth::password::PasswordError> for ApiError {
    fn from(err: internlink_shared::auth::password::PasswordError) -> Self {
        ApiError::internal(format!("Password operation failed: {}", err))
    }
}

/// Convert validator derive output to field-level validation errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::bad_request("missing_fields", "All fields are required");
        assert_eq!(err.to_string(), "Bad request: All fields are required");

        let err = ApiError::not_found("Internship not found");
        assert_eq!(err.to_string(), "Not found: Internship not found");
    }

    #[test]
    fn test_login_failure_carries_code() {
        let err = ApiError::login_failure("email_not_found", "No account with that email");
        match err {
            ApiError::Unauthenticated { code, .. } => assert_eq!(code, "email_not_found"),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_validation_error_count() {
        let errors = vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
            ValidationErrorDetail {
                field: "title".to_string(),
                message: "Title is required".to_string(),
            },
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }
}
