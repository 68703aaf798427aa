//! Core store for the course roster service.
//!
//! Provides course and student tables, the enrollment association,
//! live configuration, and write-time validation of course size.

pub mod builder;
pub mod config;
pub mod database;
pub mod error;
pub mod model;
pub mod table;
pub mod validation;

pub use database::Database;
pub use error::DbError;
