//! # InternLink API Server Library
//!
//! Role-based HTTP/JSON API matching students and companies around
//! internship postings and applications.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, and session middleware
//! - `config`: Configuration management
//! - `error`: Error taxonomy and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
