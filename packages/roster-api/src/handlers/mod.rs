//! HTTP endpoint implementations for courses and students.

mod course_handlers;
pub mod request_utils;
pub mod response;
mod student_handlers;

pub use course_handlers::{
    create_course, delete_course, list_courses, partial_update_course, read_course, update_course,
};
pub use response::{error_response, ApiError, ErrorResponse};
pub use student_handlers::{create_student, delete_student, list_students, read_student};
