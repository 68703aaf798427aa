//! Enforcement of the per-course student limit.

use roster_core::builder::CourseBuilder;
use roster_core::model::{CoursePatch, NewCourse};
use roster_core::table::CourseFilter;
use roster_core::DbError;

use super::helpers::{database_with_limit, seed_students};

#[test]
fn test_create_up_to_limit() {
    let db = database_with_limit(3);
    seed_students(&db, 3);

    for k in 0..=3u64 {
        let ids: Vec<u64> = (1..=k).collect();
        let course = db
            .create_course(NewCourse::new(format!("k{}", k), ids.clone()))
            .unwrap();
        assert_eq!(course.students, ids);
    }
}

#[test]
fn test_create_over_limit_persists_nothing() {
    let db = database_with_limit(2);
    seed_students(&db, 3);

    let err = db
        .create_course(NewCourse::new("Crowded", vec![1, 2, 3]))
        .unwrap_err();
    assert_eq!(err, DbError::TooManyStudents { count: 3, max: 2 });
    assert!(err.is_validation());
    assert_eq!(db.course_count().unwrap(), 0);
    assert!(db
        .list_courses(&CourseFilter::new().with_name("Crowded"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_zero_limit_rejects_enrollment() {
    let db = database_with_limit(20);
    seed_students(&db, 2);
    db.config().update(|c| c.max_students_per_course = 0);

    let err = db
        .create_course(NewCourse::new("X", vec![1, 2]))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.course_count().unwrap(), 0);
}

#[test]
fn test_raising_limit_allows_retry() {
    let db = database_with_limit(1);
    seed_students(&db, 2);

    assert!(db.create_course(NewCourse::new("X", vec![1, 2])).is_err());
    db.config().update(|c| c.max_students_per_course = 2);
    assert!(db.create_course(NewCourse::new("X", vec![1, 2])).is_ok());
}

#[test]
fn test_patch_over_limit_leaves_course_intact() {
    let db = database_with_limit(2);
    seed_students(&db, 3);
    CourseBuilder::new()
        .id(1)
        .name("Keep")
        .students([1])
        .insert(&db)
        .unwrap();

    let err = db
        .update_course(
            1,
            CoursePatch {
                name: Some("Changed".to_string()),
                students: Some(vec![1, 2, 3]),
            },
        )
        .unwrap_err();
    assert!(err.is_validation());

    // Neither field changed
    let course = db.get_course(1).unwrap();
    assert_eq!(course.name, "Keep");
    assert_eq!(course.students, vec![1]);
}

#[test]
fn test_unknown_student_rejected() {
    let db = database_with_limit(5);
    seed_students(&db, 1);

    assert_eq!(
        db.create_course(NewCourse::new("X", vec![1, 7])),
        Err(DbError::UnknownStudent { id: 7 })
    );
    assert_eq!(db.course_count().unwrap(), 0);
}

#[test]
fn test_repeated_ids_count_toward_limit() {
    let db = database_with_limit(1);
    seed_students(&db, 1);

    let err = db
        .create_course(NewCourse::new("Twice", vec![1, 1]))
        .unwrap_err();
    assert_eq!(err, DbError::TooManyStudents { count: 2, max: 1 });
    assert_eq!(db.course_count().unwrap(), 0);

    let course = db.create_course(NewCourse::new("Once", vec![1])).unwrap();
    let err = db
        .update_course(
            course.id,
            CoursePatch {
                name: None,
                students: Some(vec![1, 1]),
            },
        )
        .unwrap_err();
    assert_eq!(err, DbError::TooManyStudents { count: 2, max: 1 });
}
