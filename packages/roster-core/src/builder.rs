//! Builders that insert students and courses with sensible defaults.
//!
//! Handy for seeding a store in tests and demos: every field can be
//! overridden, anything left unset gets the next free id and a generated
//! name.
//!
//! ```
//! use roster_core::builder::{CourseBuilder, StudentBuilder};
//! use roster_core::Database;
//!
//! let db = Database::new();
//! let ada = StudentBuilder::new().name("Ada").insert(&db).unwrap();
//! let course = CourseBuilder::new().student(ada.id).insert(&db).unwrap();
//! assert_eq!(course.name, "Course 1");
//! assert_eq!(course.students, vec![ada.id]);
//! ```

use crate::database::Database;
use crate::error::DbError;
use crate::model::{Course, Student};

/// Builds and inserts a [`Student`].
#[derive(Debug, Clone, Default)]
pub struct StudentBuilder {
    id: Option<u64>,
    name: Option<String>,
}

impl StudentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Inserts the student. The default name is `Student {id}`.
    pub fn insert(self, db: &Database) -> Result<Student, DbError> {
        let name = self.name;
        db.insert_student_with(self.id, |id| {
            name.unwrap_or_else(|| format!("Student {}", id))
        })
    }
}

/// Builds and inserts a [`Course`].
#[derive(Debug, Clone, Default)]
pub struct CourseBuilder {
    id: Option<u64>,
    name: Option<String>,
    students: Vec<u64>,
}

impl CourseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds one student to the enrollment.
    pub fn student(mut self, student_id: u64) -> Self {
        self.students.push(student_id);
        self
    }

    /// Replaces the enrollment.
    pub fn students(mut self, student_ids: impl IntoIterator<Item = u64>) -> Self {
        self.students = student_ids.into_iter().collect();
        self
    }

    /// Inserts the course through the store's validated write path. The
    /// default name is `Course {id}`.
    pub fn insert(self, db: &Database) -> Result<Course, DbError> {
        let name = self.name;
        db.insert_course_with(
            self.id,
            |id| name.unwrap_or_else(|| format!("Course {}", id)),
            &self.students,
        )
    }
}
