/// Application state and router builder
///
/// This module defines the shared application state, the session-cookie
/// middleware (the authorization gate's "is there a session" half), and the
/// function that assembles the Axum router.
///
/// # Router layout
///
/// ```text
/// /health                          # liveness (public)
/// /api/
/// ├── POST /signup                 # public
/// ├── POST /login                  # public
/// ├── GET  /logout                 # public (destroys session if present)
/// ├── GET  /me                     # session required
/// ├── GET/PUT /student-profile     # student role
/// ├── GET/PUT /company-profile     # company role
/// ├── GET  /internships/search     # any authenticated role
/// ├── GET/POST /internships        # company role
/// ├── PUT/DELETE /internships/:id  # company role
/// ├── POST /applications           # student role
/// ├── GET  /applications/student   # student role
/// ├── GET  /applications/company   # company role
/// └── PUT  /applications/:id/status # company role
/// ```
///
/// Session presence is enforced by middleware on the protected group; role
/// checks happen in the handlers via [`require_role`], and ownership checks
/// live in the data layer as WHERE predicates.
use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use internlink_shared::auth::session::{Identity, SessionStore};
use internlink_shared::models::account::Role;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sid";

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; all fields
/// are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Server-side session store
    pub sessions: Arc<dyn SessionStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, sessions: Arc<dyn SessionStore>, config: Config) -> Self {
        Self {
            db,
            sessions,
            config: Arc::new(config),
        }
    }
}

/// Builds a `Set-Cookie` value establishing the session
pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.as_secs()
    )
}

/// Builds a `Set-Cookie` value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extracts the session token from a request's `Cookie` header
pub fn extract_session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Fails with 403 unless the session's role matches the required one
///
/// The session middleware has already guaranteed authentication, so a
/// mismatch here is always a role problem, never a missing session.
pub fn require_role(identity: &Identity, required: Role) -> Result<(), ApiError> {
    if identity.role != required {
        return Err(ApiError::forbidden(format!(
            "Access denied. This page is only for {} accounts.",
            required
        )));
    }
    Ok(())
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Public: no session required
    let public_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login))
        .route("/logout", get(routes::auth::logout));

    // Protected: session middleware injects Identity into extensions
    let protected_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .route(
            "/student-profile",
            get(routes::student_profile::get_profile).put(routes::student_profile::update_profile),
        )
        .route(
            "/company-profile",
            get(routes::company_profile::get_profile).put(routes::company_profile::update_profile),
        )
        .route("/internships/search", get(routes::internships::search))
        .route(
            "/internships",
            get(routes::internships::list_own).post(routes::internships::create),
        )
        .route(
            "/internships/:id",
            put(routes::internships::update).delete(routes::internships::delete),
        )
        .route("/applications", post(routes::applications::submit))
        .route(
            "/applications/student",
            get(routes::applications::list_for_student),
        )
        .route(
            "/applications/company",
            get(routes::applications::list_for_company),
        )
        .route(
            "/applications/:id/status",
            put(routes::applications::set_status),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Session authentication middleware
///
/// Resolves the `sid` cookie through the session store and injects the
/// resulting [`Identity`] into request extensions. Requests without a live
/// session are rejected with 401 before reaching any handler.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_session_token(req.headers())
        .ok_or_else(|| ApiError::unauthenticated("You must be logged in to access this page"))?;

    let identity = state
        .sessions
        .get(&token)
        .await
        .ok_or_else(|| ApiError::unauthenticated("You must be logged in to access this page"))?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};
    use uuid::Uuid;

    #[test]
    fn test_extract_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc123; other=1"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_session_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(extract_session_token(&headers), None);
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_session_token_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sid="));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", Duration::from_secs(3600));
        assert!(cookie.starts_with("sid=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));

        let cleared = clear_session_cookie();
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn test_require_role() {
        let student = Identity {
            account_id: Uuid::new_v4(),
            role: Role::Student,
        };

        assert!(require_role(&student, Role::Student).is_ok());
        assert!(matches!(
            require_role(&student, Role::Company),
            Err(ApiError::Forbidden(_))
        ));
    }
}
