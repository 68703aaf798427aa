//! Store error types.

use thiserror::Error;

/// Store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// Course not found
    #[error("Course {id} not found")]
    CourseNotFound { id: u64 },

    /// Student not found
    #[error("Student {id} not found")]
    StudentNotFound { id: u64 },

    /// Course would exceed the configured enrollment limit
    #[error("Course cannot have more than {max} students (got {count})")]
    TooManyStudents { count: usize, max: usize },

    /// Write references a student that does not exist
    #[error("Invalid student id {id}: object does not exist")]
    UnknownStudent { id: u64 },

    /// Explicit id already taken
    #[error("Record {id} already exists in table '{table}'")]
    DuplicateId { table: &'static str, id: u64 },

    /// Explicit id outside the usable range
    #[error("Id {id} is out of range for table '{table}'")]
    InvalidId { table: &'static str, id: u64 },

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl DbError {
    /// Returns true if the write was rejected by a business rule and nothing
    /// was changed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DbError::TooManyStudents { .. }
                | DbError::UnknownStudent { .. }
                | DbError::DuplicateId { .. }
                | DbError::InvalidId { .. }
        )
    }

    /// Returns true if the error names a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DbError::CourseNotFound { .. } | DbError::StudentNotFound { .. }
        )
    }

    /// Stable machine-readable name of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            DbError::CourseNotFound { .. } => "course_not_found",
            DbError::StudentNotFound { .. } => "student_not_found",
            DbError::TooManyStudents { .. } => "too_many_students",
            DbError::UnknownStudent { .. } => "unknown_student",
            DbError::DuplicateId { .. } => "duplicate_id",
            DbError::InvalidId { .. } => "invalid_id",
            DbError::LockPoisoned => "lock_poisoned",
        }
    }
}
