/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/signup` - Create account + role profile, establish session
/// - `POST /api/login` - Establish session for an existing account
/// - `GET /api/logout` - Destroy the current session
/// - `GET /api/me` - Name and role of the current session's account
///
/// Request fields are `Option`s so that absent and empty values both surface
/// as the `missing_fields` code instead of a deserializer error. Every
/// failure carries a machine-readable code (`invalid_email`,
/// `email_not_found`, `not_student_account`, ...) that clients can branch on.
use crate::{
    app::{clear_session_cookie, extract_session_token, session_cookie, AppState},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use internlink_shared::{
    auth::{password, session::Identity},
    models::{
        account::{Account, CreateAccount, Role},
        company_profile::CompanyProfile,
        student_profile::StudentProfile,
    },
    validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub retype_password: Option<String>,
    pub user_type: Option<String>,
}

/// Signup / login response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Account ID of the session
    pub account_id: Uuid,

    /// Display name
    pub full_name: String,

    /// Session role
    pub user_type: Role,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub full_name: String,
    pub user_type: Role,
}

pub(crate) fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

/// Validates and verifies an optional password change carried by a profile
/// update
///
/// A change is requested when any of the three password fields is non-empty;
/// all three must then be present together. Returns the new Argon2id hash
/// when a change was requested, `None` otherwise.
pub(crate) async fn process_password_change(
    state: &AppState,
    account_id: Uuid,
    current: Option<&str>,
    new: Option<&str>,
    confirm: Option<&str>,
) -> ApiResult<Option<String>> {
    if current.is_none() && new.is_none() && confirm.is_none() {
        return Ok(None);
    }

    let (current, new, confirm) = match (current, new, confirm) {
        (Some(c), Some(n), Some(f)) => (c, n, f),
        _ => {
            return Err(ApiError::bad_request(
                "password_fields_required",
                "All password fields are required when changing password",
            ))
        }
    };

    if !validation::is_valid_password(new, true) {
        return Err(ApiError::bad_request(
            "invalid_password",
            "New password must be at least 8 characters long with at least 1 uppercase, 1 lowercase, 1 number, and 1 special character",
        ));
    }

    if new != confirm {
        return Err(ApiError::bad_request(
            "password_mismatch",
            "New passwords do not match",
        ));
    }

    let account = Account::find_by_id(&state.db, account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !password::verify_password(current, &account.password_hash)? {
        return Err(ApiError::bad_request(
            "current_password_incorrect",
            "Current password is incorrect",
        ));
    }

    Ok(Some(password::hash_password(new)?))
}

/// Registers a new account
///
/// Creates the account row and its role profile inside one transaction, so a
/// crash mid-signup cannot leave an orphan account, then establishes the
/// session (signup implies login).
///
/// # Errors
///
/// - `400`: missing or malformed fields, each with a machine-readable code
/// - `409 email_exists`: duplicate email, detected via the unique constraint
///   rather than a pre-check so concurrent signups cannot race
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let (full_name, email, password_raw, retype, user_type) = match (
        required(&req.full_name),
        required(&req.email),
        required(&req.password),
        required(&req.retype_password),
        required(&req.user_type),
    ) {
        (Some(a), Some(b), Some(c), Some(d), Some(e)) => (a, b, c, d, e),
        _ => return Err(ApiError::bad_request("missing_fields", "All fields are required")),
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

    if !validation::is_valid_password(password_raw, true) {
        return Err(ApiError::bad_request(
            "invalid_password",
            "Password must be at least 8 characters long with at least 1 uppercase, 1 lowercase, 1 number, and 1 special character",
        ));
    }

    let role = Role::parse(user_type).ok_or_else(|| {
        ApiError::bad_request("invalid_user_type", "User type must be student or company")
    })?;

    if password_raw != retype {
        return Err(ApiError::bad_request(
            "password_mismatch",
            "Passwords do not match",
        ));
    }

    let password_hash = password::hash_password(password_raw)?;
    let full_name = full_name.trim().to_string();
    let email = email.trim().to_lowercase();

    // Account row and profile row stand or fall together
    let mut tx = state.db.begin().await?;

    let account = Account::create(
        &mut *tx,
        CreateAccount {
            full_name: full_name.clone(),
            email,
            password_hash,
            role,
        },
    )
    .await?;

    match role {
        Role::Student => StudentProfile::create(&mut *tx, account.id).await?,
        Role::Company => CompanyProfile::create(&mut *tx, account.id, &full_name).await?,
    }

    tx.commit().await?;

    tracing::info!(account_id = %account.id, role = %role, "Account created");

    let token = state
        .sessions
        .create(Identity {
            account_id: account.id,
            role,
        })
        .await;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, session_cookie(&token, state.config.session_ttl()))],
        Json(SessionResponse {
            account_id: account.id,
            full_name: account.full_name,
            user_type: role,
        }),
    ))
}

/// Logs in an existing account
///
/// # Errors
///
/// - `400`: missing or malformed fields
/// - `401 email_not_found` / `password_not_found`: credential failure
/// - `401 not_student_account` / `not_company_account`: account exists but
///   has the other role
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (email, password_raw, user_type) = match (
        required(&req.email),
        required(&req.password),
        required(&req.user_type),
    ) {
        (Some(a), Some(b), Some(c)) => (a, b, c),
        _ => return Err(ApiError::bad_request("missing_fields", "All fields are required")),
    };

    if !validation::is_valid_email(email) {
        return Err(ApiError::bad_request(
            "invalid_email",
            "Please enter a valid email address",
        ));
    }

    // Login only enforces the 6-character minimum, not full complexity
    if !validation::is_valid_password(password_raw, false) {
        return Err(ApiError::bad_request(
            "invalid_password",
            "Password must be at least 6 characters",
        ));
    }

    let requested_role = Role::parse(user_type).ok_or_else(|| {
        ApiError::bad_request("invalid_user_type", "User type must be student or company")
    })?;

    let account = Account::find_by_email(&state.db, &email.trim().to_lowercase())
        .await?
        .ok_or_else(|| {
            ApiError::login_failure("email_not_found", "No account found with that email")
        })?;

    if !password::verify_password(password_raw, &account.password_hash)? {
        return Err(ApiError::login_failure(
            "password_not_found",
            "Incorrect password",
        ));
    }

    if account.role != requested_role {
        let code = match requested_role {
            Role::Student => "not_student_account",
            Role::Company => "not_company_account",
        };
        return Err(ApiError::login_failure(
            code,
            format!("This account is not a {} account", requested_role),
        ));
    }

    let token = state
        .sessions
        .create(Identity {
            account_id: account.id,
            role: account.role,
        })
        .await;

    Ok((
        [(SET_COOKIE, session_cookie(&token, state.config.session_ttl()))],
        Json(SessionResponse {
            account_id: account.id,
            full_name: account.full_name,
            user_type: account.role,
        }),
    ))
}

/// Destroys the current session, if any
///
/// Always succeeds and always clears the cookie, so logout is idempotent and
/// safe to call without a live session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        state.sessions.destroy(&token).await;
    }

    (
        [(SET_COOKIE, clear_session_cookie())],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}

/// Returns the name and role of the current session's account
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<MeResponse>> {
    let account = Account::find_by_id(&state.db, identity.account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User information not found"))?;

    Ok(Json(MeResponse {
        full_name: account.full_name,
        user_type: identity.role,
    }))
}
