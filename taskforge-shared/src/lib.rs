//! # Taskforge Shared Library
//!
//! This crate contains the domain layer shared by the Taskforge API server
//! and any future binaries: entity models, repositories, domain services,
//! password hashing, and database utilities.
//!
//! ## Module Organization
//!
//! - `models`: Entity definitions (User, Task, Category) and enumerations
//! - `repository`: Storage accessor traits with Postgres and in-memory backends
//! - `service`: Domain services layering validation and uniqueness checks
//!   on top of the repositories
//! - `auth`: Password hashing and verification
//! - `db`: Connection pool and migration runner
//! - `error`: Common error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

/// Current version of the Taskforge shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
