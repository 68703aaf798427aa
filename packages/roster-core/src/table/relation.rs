//! Many-to-many association rows between courses and students.

use std::collections::BTreeSet;

/// Set of `(course_id, student_id)` rows.
///
/// Rows are owned by the course side: deleting a course drops its rows,
/// deleting a student drops every row that points at it.
#[derive(Debug, Clone, Default)]
pub struct Association {
    rows: BTreeSet<(u64, u64)>,
}

impl Association {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the student ids linked to `course_id` in ascending order.
    pub fn targets(&self, course_id: u64) -> Vec<u64> {
        self.rows
            .range((course_id, u64::MIN)..=(course_id, u64::MAX))
            .map(|&(_, student_id)| student_id)
            .collect()
    }

    /// Replaces every row of `course_id` with links to `student_ids`.
    pub fn replace(&mut self, course_id: u64, student_ids: &[u64]) {
        self.unlink_course(course_id);
        for &student_id in student_ids {
            self.rows.insert((course_id, student_id));
        }
    }

    /// Drops all rows of a course, returning how many were removed.
    pub fn unlink_course(&mut self, course_id: u64) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|&(linked_course, _)| linked_course != course_id);
        before - self.rows.len()
    }

    /// Drops all rows pointing at a student, returning how many were removed.
    pub fn unlink_student(&mut self, student_id: u64) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|&(_, linked_student)| linked_student != student_id);
        before - self.rows.len()
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
