//! Integration test suite for the roster store.
//!
//! 1. Course CRUD and listing
//! 2. Enrollment limit
//! 3. Student lifecycle

pub mod course_crud_tests;
pub mod enrollment_limit_tests;
pub mod helpers;
pub mod student_tests;
