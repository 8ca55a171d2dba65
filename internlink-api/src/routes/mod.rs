/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Liveness endpoint
/// - `auth`: Signup, login, logout, current-user info
/// - `student_profile` / `company_profile`: Profile read/update
/// - `internships`: Posting CRUD and search
/// - `applications`: Application submission, listings, status workflow

pub mod applications;
pub mod auth;
pub mod company_profile;
pub mod health;
pub mod internships;
pub mod student_profile;
