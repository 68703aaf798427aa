//! Write-time validation of course enrollment.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::LiveConfig;
use crate::error::DbError;

/// Enforces the per-course student limit.
///
/// The limit is read from the live configuration on every call, never
/// cached, so a change made through [`LiveConfig::update`] applies to the
/// next write.
#[derive(Debug, Clone)]
pub struct CourseValidator {
    config: Arc<LiveConfig>,
}

impl CourseValidator {
    pub fn new(config: Arc<LiveConfig>) -> Self {
        Self { config }
    }

    /// Checks a candidate enrollment set against the current limit.
    ///
    /// # Arguments
    /// * `student_ids` - Student ids as submitted, repeats included
    ///
    /// # Returns
    /// `Result<(), DbError>` with `TooManyStudents` on violation.
    pub fn validate(&self, student_ids: &[u64]) -> Result<(), DbError> {
        let max = self.config.max_students_per_course();
        let count = student_ids.len();
        if count > max {
            return Err(DbError::TooManyStudents { count, max });
        }
        Ok(())
    }
}

/// Collapses duplicate ids and sorts ascending.
pub(crate) fn normalize_student_ids(student_ids: &[u64]) -> Vec<u64> {
    student_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
