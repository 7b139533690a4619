//! # Taskforge API Server Library
//!
//! Core functionality for the Taskforge API server: a REST surface over
//! the user/task/category domain services in `taskforge-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Request extractors (owner identity)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
