//! REST API server for the course roster.
//!
//! Provides HTTP endpoints for course and student CRUD, list filtering,
//! and request routing.

pub mod handlers;
pub mod router;
pub mod server;
