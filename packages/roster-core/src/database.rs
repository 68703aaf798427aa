//! Store container holding the course and student tables.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::LiveConfig;
use crate::error::DbError;
use crate::model::{Course, CoursePatch, NewCourse, Student};
use crate::table::{Association, CourseFilter, Table};
use crate::validation::{normalize_student_ids, CourseValidator};

/// Stored student columns.
#[derive(Debug, Clone)]
struct StudentRow {
    name: String,
}

/// Stored course columns. Enrollment lives in the association.
#[derive(Debug, Clone)]
struct CourseRow {
    name: String,
}

/// All tables guarded together so a write sees one consistent state.
#[derive(Debug)]
struct Tables {
    students: Table<StudentRow>,
    courses: Table<CourseRow>,
    enrollments: Association,
}

impl Tables {
    fn new() -> Self {
        Self {
            students: Table::new("students"),
            courses: Table::new("courses"),
            enrollments: Association::new(),
        }
    }

    fn course(&self, id: u64) -> Result<Course, DbError> {
        let row = self
            .courses
            .read_record(id)
            .ok_or(DbError::CourseNotFound { id })?;
        Ok(Course {
            id,
            name: row.name.clone(),
            students: self.enrollments.targets(id),
        })
    }

    /// Every referenced student must exist.
    fn check_students_exist(&self, student_ids: &[u64]) -> Result<(), DbError> {
        match student_ids.iter().find(|&&id| !self.students.contains(id)) {
            Some(&id) => Err(DbError::UnknownStudent { id }),
            None => Ok(()),
        }
    }
}

/// In-memory course and student store.
///
/// Each write takes the single write lock for both validation and mutation,
/// so a rejected write leaves no partial state behind.
#[derive(Debug)]
pub struct Database {
    tables: RwLock<Tables>,
    config: Arc<LiveConfig>,
    validator: CourseValidator,
}

impl Database {
    /// Creates an empty store with default configuration.
    pub fn new() -> Self {
        Self::with_config(Arc::new(LiveConfig::default()))
    }

    /// Creates an empty store sharing the given live configuration.
    pub fn with_config(config: Arc<LiveConfig>) -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
            validator: CourseValidator::new(config.clone()),
            config,
        }
    }

    /// Returns the live configuration handle.
    pub fn config(&self) -> &Arc<LiveConfig> {
        &self.config
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DbError> {
        self.tables.read().map_err(|_| DbError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DbError> {
        self.tables.write().map_err(|_| DbError::LockPoisoned)
    }

    /// Runs every enrollment check and returns the normalized id set.
    ///
    /// The limit applies to the list as submitted, so a repeated id counts
    /// once per occurrence even though it is stored once.
    fn validate_enrollment(
        &self,
        tables: &Tables,
        student_ids: &[u64],
    ) -> Result<Vec<u64>, DbError> {
        tables.check_students_exist(student_ids)?;
        self.validator.validate(student_ids)?;
        Ok(normalize_student_ids(student_ids))
    }

    // ---- students ----

    /// Creates a student with the next free id.
    pub fn create_student(&self, name: impl Into<String>) -> Result<Student, DbError> {
        self.insert_student(None, name)
    }

    /// Creates a student, optionally under an explicit id.
    ///
    /// # Arguments
    /// * `id` - Explicit id, or `None` for the next free one
    /// * `name` - Student name
    ///
    /// # Returns
    /// `Result<Student, DbError>` with `DuplicateId` if `id` is taken.
    pub fn insert_student(
        &self,
        id: Option<u64>,
        name: impl Into<String>,
    ) -> Result<Student, DbError> {
        let name = name.into();
        self.insert_student_with(id, |_| name)
    }

    /// Creates a student whose name may depend on the id it receives.
    ///
    /// The id is resolved and the record written under one write lock, so
    /// concurrent callers never race for the same auto id.
    pub fn insert_student_with(
        &self,
        id: Option<u64>,
        name: impl FnOnce(u64) -> String,
    ) -> Result<Student, DbError> {
        let mut tables = self.write()?;
        let id = tables.students.reserve_id(id)?;
        let name = name(id);
        tables
            .students
            .create_record(id, StudentRow { name: name.clone() })?;
        tracing::info!(student_id = id, "Created student {}", name);
        Ok(Student { id, name })
    }

    /// Reads a student by id.
    pub fn get_student(&self, id: u64) -> Result<Student, DbError> {
        let tables = self.read()?;
        let row = tables
            .students
            .read_record(id)
            .ok_or(DbError::StudentNotFound { id })?;
        Ok(Student {
            id,
            name: row.name.clone(),
        })
    }

    /// Lists all students in ascending id order.
    pub fn list_students(&self) -> Result<Vec<Student>, DbError> {
        let tables = self.read()?;
        Ok(tables
            .students
            .iter()
            .map(|(id, row)| Student {
                id,
                name: row.name.clone(),
            })
            .collect())
    }

    /// Deletes a student and drops it from every course it was enrolled in.
    pub fn delete_student(&self, id: u64) -> Result<(), DbError> {
        let mut tables = self.write()?;
        tables
            .students
            .delete_record(id)
            .ok_or(DbError::StudentNotFound { id })?;
        let unlinked = tables.enrollments.unlink_student(id);
        tracing::info!(student_id = id, unlinked, "Deleted student");
        Ok(())
    }

    /// Returns the id the next auto-assigned student will get.
    pub fn next_student_id(&self) -> Result<u64, DbError> {
        Ok(self.read()?.students.current_next_id())
    }

    /// Returns the number of students.
    pub fn student_count(&self) -> Result<usize, DbError> {
        Ok(self.read()?.students.record_count())
    }

    // ---- courses ----

    /// Creates a course with the next free id.
    ///
    /// Fails with a validation error, persisting nothing, if a student does
    /// not exist or the course would exceed the enrollment limit.
    pub fn create_course(&self, course: NewCourse) -> Result<Course, DbError> {
        self.insert_course(None, course)
    }

    /// Creates a course, optionally under an explicit id.
    pub fn insert_course(&self, id: Option<u64>, course: NewCourse) -> Result<Course, DbError> {
        let NewCourse { name, students } = course;
        self.insert_course_with(id, |_| name, &students)
    }

    /// Creates a course whose name may depend on the id it receives.
    ///
    /// Like [`Database::insert_student_with`], the id is resolved under the
    /// same write lock that validates and stores the course.
    pub fn insert_course_with(
        &self,
        id: Option<u64>,
        name: impl FnOnce(u64) -> String,
        student_ids: &[u64],
    ) -> Result<Course, DbError> {
        let mut tables = self.write()?;
        let id = tables.courses.reserve_id(id)?;
        let name = name(id);
        let students = self
            .validate_enrollment(&tables, student_ids)
            .inspect_err(|e| tracing::warn!("Rejected course '{}': {}", name, e))?;

        tables
            .courses
            .create_record(id, CourseRow { name: name.clone() })?;
        tables.enrollments.replace(id, &students);
        tracing::info!(
            course_id = id,
            students = students.len(),
            "Created course {}",
            name
        );
        Ok(Course { id, name, students })
    }

    /// Reads a course by id.
    pub fn get_course(&self, id: u64) -> Result<Course, DbError> {
        let course = self.read()?.course(id)?;
        tracing::debug!(course_id = id, "Read course");
        Ok(course)
    }

    /// Lists courses matching `filter` in ascending id order.
    ///
    /// A name that matches nothing yields an empty list. An id that names no
    /// course yields `CourseNotFound` while `strict_id_filter` is on.
    pub fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, DbError> {
        let tables = self.read()?;
        if let Some(id) = filter.id {
            if !tables.courses.contains(id) && self.config.load().strict_id_filter {
                return Err(DbError::CourseNotFound { id });
            }
        }

        let courses = tables
            .courses
            .iter()
            .filter(|(id, row)| filter.matches(*id, &row.name))
            .map(|(id, row)| Course {
                id,
                name: row.name.clone(),
                students: tables.enrollments.targets(id),
            })
            .collect::<Vec<_>>();
        tracing::debug!(?filter, matched = courses.len(), "Listed courses");
        Ok(courses)
    }

    /// Applies a partial update.
    ///
    /// Fields absent from `patch` keep their values. A student list replaces
    /// the whole enrollment set and is validated like a create.
    pub fn update_course(&self, id: u64, patch: CoursePatch) -> Result<Course, DbError> {
        let mut tables = self.write()?;
        if !tables.courses.contains(id) {
            return Err(DbError::CourseNotFound { id });
        }

        let students = match &patch.students {
            Some(students) => Some(
                self.validate_enrollment(&tables, students)
                    .inspect_err(|e| tracing::warn!(course_id = id, "Rejected update: {}", e))?,
            ),
            None => None,
        };

        if let Some(name) = patch.name {
            if let Some(row) = tables.courses.update_record(id) {
                row.name = name;
            }
        }
        if let Some(students) = students {
            tables.enrollments.replace(id, &students);
        }

        let course = tables.course(id)?;
        tracing::info!(course_id = id, "Updated course {}", course.name);
        Ok(course)
    }

    /// Replaces name and enrollment of an existing course.
    pub fn replace_course(&self, id: u64, course: NewCourse) -> Result<Course, DbError> {
        self.update_course(
            id,
            CoursePatch {
                name: Some(course.name),
                students: Some(course.students),
            },
        )
    }

    /// Deletes a course and its enrollment rows. Students are kept.
    pub fn delete_course(&self, id: u64) -> Result<(), DbError> {
        let mut tables = self.write()?;
        tables
            .courses
            .delete_record(id)
            .ok_or(DbError::CourseNotFound { id })?;
        let unlinked = tables.enrollments.unlink_course(id);
        tracing::info!(course_id = id, unlinked, "Deleted course");
        Ok(())
    }

    /// Returns the id the next auto-assigned course will get.
    pub fn next_course_id(&self) -> Result<u64, DbError> {
        Ok(self.read()?.courses.current_next_id())
    }

    /// Returns the number of courses.
    pub fn course_count(&self) -> Result<usize, DbError> {
        Ok(self.read()?.courses.record_count())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
