//! Course retrieve, list, filter, update, and delete behavior.

use roster_core::builder::{CourseBuilder, StudentBuilder};
use roster_core::model::{CoursePatch, NewCourse};
use roster_core::table::CourseFilter;
use roster_core::{Database, DbError};

use super::helpers::seed_students;

#[test]
fn test_retrieve_course_with_students() {
    let db = Database::new();
    let a = StudentBuilder::new().name("A").insert(&db).unwrap();
    let b = StudentBuilder::new().name("B").insert(&db).unwrap();
    assert_eq!((a.id, b.id), (1, 2));

    let c1 = CourseBuilder::new()
        .name("C1")
        .students([b.id, a.id])
        .insert(&db)
        .unwrap();

    let fetched = db.get_course(c1.id).unwrap();
    assert_eq!(fetched.id, c1.id);
    assert_eq!(fetched.name, "C1");
    let mut students = fetched.students.clone();
    students.sort();
    assert_eq!(students, vec![1, 2]);
}

#[test]
fn test_get_missing_course() {
    let db = Database::new();
    assert_eq!(db.get_course(1), Err(DbError::CourseNotFound { id: 1 }));
}

#[test]
fn test_list_courses_in_id_order() {
    let db = Database::new();
    for name in ["TestCourse1", "TestCourse2", "TestCourse3"] {
        CourseBuilder::new().name(name).insert(&db).unwrap();
    }

    let courses = db.list_courses(&CourseFilter::new()).unwrap();
    let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["TestCourse1", "TestCourse2", "TestCourse3"]);
    assert!(courses.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_list_empty_store() {
    let db = Database::new();
    assert!(db.list_courses(&CourseFilter::new()).unwrap().is_empty());
}

#[test]
fn test_filter_by_id() {
    let db = Database::new();
    for id in 1..=5 {
        CourseBuilder::new()
            .id(id)
            .name(format!("TestCourse{}", id))
            .insert(&db)
            .unwrap();
    }

    for id in 1..=5 {
        let courses = db.list_courses(&CourseFilter::new().with_id(id)).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, id);
    }

    assert_eq!(
        db.list_courses(&CourseFilter::new().with_id(6)),
        Err(DbError::CourseNotFound { id: 6 })
    );
}

#[test]
fn test_filter_by_id_lenient() {
    let db = Database::new();
    db.config().update(|c| c.strict_id_filter = false);
    CourseBuilder::new().insert(&db).unwrap();

    let courses = db.list_courses(&CourseFilter::new().with_id(99)).unwrap();
    assert!(courses.is_empty());
}

#[test]
fn test_filter_by_name() {
    let db = Database::new();
    let names = [
        "TestCourse1",
        "TestCourse2",
        "TestCourse3",
        "TestCourse4",
        "TestCourse5",
    ];
    for name in names {
        CourseBuilder::new().name(name).insert(&db).unwrap();
    }

    for name in names {
        let courses = db
            .list_courses(&CourseFilter::new().with_name(name))
            .unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, name);
    }

    let missing = db
        .list_courses(&CourseFilter::new().with_name("TestCourse7"))
        .unwrap();
    assert!(missing.is_empty());

    // Exact match only, no prefix matching
    let prefix = db
        .list_courses(&CourseFilter::new().with_name("TestCourse"))
        .unwrap();
    assert!(prefix.is_empty());
}

#[test]
fn test_filter_by_id_and_name() {
    let db = Database::new();
    CourseBuilder::new()
        .id(1)
        .name("Algebra")
        .insert(&db)
        .unwrap();
    CourseBuilder::new()
        .id(2)
        .name("Biology")
        .insert(&db)
        .unwrap();

    let hit = db
        .list_courses(&CourseFilter::new().with_id(2).with_name("Biology"))
        .unwrap();
    assert_eq!(hit.len(), 1);

    let miss = db
        .list_courses(&CourseFilter::new().with_id(2).with_name("Algebra"))
        .unwrap();
    assert!(miss.is_empty());
}

#[test]
fn test_filter_by_name_shared_by_many() {
    let db = Database::new();
    CourseBuilder::new().name("Same").insert(&db).unwrap();
    CourseBuilder::new().name("Other").insert(&db).unwrap();
    CourseBuilder::new().name("Same").insert(&db).unwrap();

    let courses = db
        .list_courses(&CourseFilter::new().with_name("Same"))
        .unwrap();
    let ids: Vec<u64> = courses.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_create_course_with_students() {
    let db = Database::new();
    seed_students(&db, 2);

    let course = db
        .create_course(NewCourse::new("TestCourse1", vec![1, 2]))
        .unwrap();
    assert_eq!(course.name, "TestCourse1");
    assert_eq!(course.students, vec![1, 2]);
    assert_eq!(db.get_course(course.id).unwrap(), course);
}

#[test]
fn test_patch_name_and_students() {
    let db = Database::new();
    seed_students(&db, 1);
    CourseBuilder::new()
        .id(1)
        .name("TestCourse1")
        .insert(&db)
        .unwrap();

    let updated = db
        .update_course(
            1,
            CoursePatch {
                name: Some("UpdateCourse".to_string()),
                students: Some(vec![1]),
            },
        )
        .unwrap();

    assert_eq!(updated.name, "UpdateCourse");
    assert_eq!(updated.students, vec![1]);
    assert_eq!(db.get_course(1).unwrap(), updated);
}

#[test]
fn test_patch_keeps_unspecified_fields() {
    let db = Database::new();
    seed_students(&db, 3);
    CourseBuilder::new()
        .id(1)
        .name("Original")
        .students([1, 2])
        .insert(&db)
        .unwrap();

    let renamed = db.update_course(1, CoursePatch::name("Renamed")).unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.students, vec![1, 2]);

    let moved = db.update_course(1, CoursePatch::students(vec![3])).unwrap();
    assert_eq!(moved.name, "Renamed");
    assert_eq!(moved.students, vec![3]);

    let cleared = db.update_course(1, CoursePatch::students(vec![])).unwrap();
    assert!(cleared.students.is_empty());
}

#[test]
fn test_patch_missing_course() {
    let db = Database::new();
    assert_eq!(
        db.update_course(4, CoursePatch::name("x")),
        Err(DbError::CourseNotFound { id: 4 })
    );
}

#[test]
fn test_replace_course() {
    let db = Database::new();
    seed_students(&db, 2);
    CourseBuilder::new()
        .id(1)
        .name("Old")
        .students([1])
        .insert(&db)
        .unwrap();

    let replaced = db
        .replace_course(1, NewCourse::new("New", vec![2]))
        .unwrap();
    assert_eq!(replaced.name, "New");
    assert_eq!(replaced.students, vec![2]);

    // A replacement without students clears the enrollment
    let cleared = db.replace_course(1, NewCourse::new("New", vec![])).unwrap();
    assert!(cleared.students.is_empty());
}

#[test]
fn test_delete_course() {
    let db = Database::new();
    seed_students(&db, 2);
    CourseBuilder::new()
        .id(1)
        .students([1, 2])
        .insert(&db)
        .unwrap();
    CourseBuilder::new().id(2).insert(&db).unwrap();
    assert_eq!(db.course_count().unwrap(), 2);

    db.delete_course(1).unwrap();

    assert_eq!(db.course_count().unwrap(), 1);
    assert_eq!(db.get_course(1), Err(DbError::CourseNotFound { id: 1 }));
    // Students survive their course
    assert_eq!(db.student_count().unwrap(), 2);
    assert_eq!(db.delete_course(1), Err(DbError::CourseNotFound { id: 1 }));
}
