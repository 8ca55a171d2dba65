/// Database models
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `account`: User accounts and the student/company role
/// - `student_profile`: Student extension record, 1:1 with an account
/// - `company_profile`: Company extension record, 1:1 with an account
/// - `posting`: Internship postings owned by a company account
/// - `application`: Student applications against postings, with status
///
/// Ownership-scoped writes (posting update/delete, application status) carry
/// the owner id in the WHERE clause and report success via rows-affected, so
/// "not found" and "not owned" are indistinguishable to callers.

pub mod account;
pub mod application;
pub mod company_profile;
pub mod posting;
pub mod student_profile;
