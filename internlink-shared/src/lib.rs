//! # InternLink Shared Library
//!
//! This crate contains the models, authentication primitives, and validation
//! logic shared by the InternLink API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing and session management
//! - `db`: Connection pool and migration runner
//! - `validation`: Pure field-format predicates

pub mod auth;
pub mod db;
pub mod models;
pub mod validation;

/// Current version of the InternLink shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
