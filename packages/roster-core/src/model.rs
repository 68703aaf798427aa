//! Record types exchanged with callers.

use serde::{Deserialize, Serialize};

/// A student as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
}

/// A course with the ids of its enrolled students in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub students: Vec<u64>,
}

/// Fields for creating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub name: String,
}

/// Fields for creating or fully replacing a course.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCourse {
    pub name: String,
    /// Missing in a request body means no students
    #[serde(default)]
    pub students: Vec<u64>,
}

impl NewCourse {
    pub fn new(name: impl Into<String>, students: Vec<u64>) -> Self {
        Self {
            name: name.into(),
            students,
        }
    }
}

/// Partial course update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursePatch {
    pub name: Option<String>,
    /// Replaces the whole enrollment set when present
    pub students: Option<Vec<u64>>,
}

impl CoursePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            students: None,
        }
    }

    pub fn students(students: Vec<u64>) -> Self {
        Self {
            name: None,
            students: Some(students),
        }
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.students.is_none()
    }
}
