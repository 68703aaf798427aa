//! Student lifecycle and its effect on enrollment.

use roster_core::builder::{CourseBuilder, StudentBuilder};
use roster_core::{Database, DbError};

#[test]
fn test_create_and_list_students() {
    let db = Database::new();
    let a = db.create_student("A").unwrap();
    let b = db.create_student("B").unwrap();
    assert_eq!((a.id, b.id), (1, 2));

    let students = db.list_students().unwrap();
    assert_eq!(students, vec![a.clone(), b]);
    assert_eq!(db.get_student(1).unwrap(), a);
}

#[test]
fn test_explicit_student_id_collision() {
    let db = Database::new();
    StudentBuilder::new().id(1).insert(&db).unwrap();
    let err = StudentBuilder::new().id(1).insert(&db).unwrap_err();
    assert_eq!(
        err,
        DbError::DuplicateId {
            table: "students",
            id: 1
        }
    );
}

#[test]
fn test_delete_student_unenrolls_everywhere() {
    let db = Database::new();
    for _ in 0..3 {
        StudentBuilder::new().insert(&db).unwrap();
    }
    CourseBuilder::new()
        .id(1)
        .students([1, 2])
        .insert(&db)
        .unwrap();
    CourseBuilder::new()
        .id(2)
        .students([2, 3])
        .insert(&db)
        .unwrap();

    db.delete_student(2).unwrap();

    assert_eq!(db.get_course(1).unwrap().students, vec![1]);
    assert_eq!(db.get_course(2).unwrap().students, vec![3]);
    assert_eq!(db.course_count().unwrap(), 2);
    assert_eq!(db.get_student(2), Err(DbError::StudentNotFound { id: 2 }));
    assert_eq!(
        db.delete_student(2),
        Err(DbError::StudentNotFound { id: 2 })
    );
}
