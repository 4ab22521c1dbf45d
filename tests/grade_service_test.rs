//! Grade management service tests.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use grade_entry::domain::{Grade, GradeChanges, NewGrade};
use grade_entry::errors::AppError;
use grade_entry::infra::{
    MockCourseRepository, MockGradeRepository, MockStudentRepository, MockUserRepository,
};
use grade_entry::services::{GradeInput, GradeManager, GradeService};

use common::{course, student, TestUnitOfWork};

fn service(
    students: MockStudentRepository,
    courses: MockCourseRepository,
    grades: MockGradeRepository,
) -> GradeManager<TestUnitOfWork> {
    GradeManager::new(Arc::new(TestUnitOfWork::new(
        MockUserRepository::new(),
        students,
        courses,
        grades,
    )))
}

fn input(student_id: i32, course_id: i32, value: Option<&str>) -> GradeInput {
    GradeInput {
        student_id,
        course_id,
        grade_value: value.map(str::to_string),
    }
}

fn stored(id: i32, grade: NewGrade) -> Grade {
    Grade {
        id,
        student_id: grade.student_id,
        course_id: grade.course_id,
        grade_value: grade.grade_value,
        date_entered: grade.date_entered,
        entered_by_teacher_id: grade.entered_by_teacher_id,
    }
}

#[tokio::test]
async fn test_invalid_grade_value_never_touches_persistence() {
    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        MockGradeRepository::new(),
    );

    let result = service
        .create_grade(input(1, 1, Some("A+ (not real)")), 9)
        .await;

    assert!(matches!(result, Err(AppError::InvalidGradeValue)));
}

#[tokio::test]
async fn test_missing_grade_value_is_invalid() {
    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        MockGradeRepository::new(),
    );

    let result = service.create_grade(input(1, 1, None), 9).await;
    assert!(matches!(result, Err(AppError::InvalidGradeValue)));

    let result = service.create_grade(input(1, 1, Some("   ")), 9).await;
    assert!(matches!(result, Err(AppError::InvalidGradeValue)));
}

#[tokio::test]
async fn test_create_with_unknown_student_creates_nothing() {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .with(eq(404))
        .times(1)
        .returning(|_| Ok(None));

    let mut grades = MockGradeRepository::new();
    grades.expect_create().times(0);

    let service = service(students, MockCourseRepository::new(), grades);
    let result = service
        .create_grade(input(404, 1, Some("B (83-86)")), 9)
        .await;

    assert!(matches!(result, Err(AppError::UnknownStudent(404))));
}

#[tokio::test]
async fn test_create_with_unknown_course_creates_nothing() {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(|id| Ok(Some(student(id))));

    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .with(eq(77))
        .returning(|_| Ok(None));

    let mut grades = MockGradeRepository::new();
    grades.expect_create().times(0);

    let service = service(students, courses, grades);
    let result = service
        .create_grade(input(1, 77, Some("B (83-86)")), 9)
        .await;

    assert!(matches!(result, Err(AppError::UnknownCourse(77))));
}

#[tokio::test]
async fn test_create_stamps_caller_and_time() {
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(|id| Ok(Some(student(id))));

    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .returning(|id| Ok(Some(course(id))));

    let mut grades = MockGradeRepository::new();
    grades
        .expect_create()
        .withf(|g: &NewGrade| g.grade_value == "B+ (87-89)" && g.entered_by_teacher_id == 9)
        .times(1)
        .returning(|g| Ok(stored(31, g)));

    let before = Utc::now();
    let service = service(students, courses, grades);
    let details = service
        .create_grade(input(1, 2, Some("  B+ (87-89)  ")), 9)
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(details.grade.id, 31);
    assert_eq!(details.grade.student_id, 1);
    assert_eq!(details.grade.course_id, 2);
    assert_eq!(details.grade.grade_value, "B+ (87-89)");
    assert_eq!(details.grade.entered_by_teacher_id, 9);
    assert!(details.grade.date_entered >= before && details.grade.date_entered <= after);
    assert_eq!(details.student.unwrap().first_name, "Ann");
    assert_eq!(details.course.unwrap().code, "CS101");
}

#[tokio::test]
async fn test_update_rejects_id_mismatch_first() {
    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        MockGradeRepository::new(),
    );

    let result = service
        .update_grade(5, Some(6), input(1, 1, Some("nonsense")))
        .await;

    assert!(matches!(
        result,
        Err(AppError::IdMismatch { path: 5, body: 6 })
    ));
}

#[tokio::test]
async fn test_update_checks_value_before_existence() {
    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        MockGradeRepository::new(),
    );

    let result = service
        .update_grade(5, Some(5), input(1, 1, Some("a (93-100)")))
        .await;

    assert!(matches!(result, Err(AppError::InvalidGradeValue)));
}

#[tokio::test]
async fn test_update_missing_grade_is_not_found() {
    let mut grades = MockGradeRepository::new();
    grades.expect_exists().with(eq(5)).returning(|_| Ok(false));
    grades.expect_update().times(0);

    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        grades,
    );
    let result = service
        .update_grade(5, None, input(1, 1, Some("C (73-76)")))
        .await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_update_revalidates_student() {
    let mut grades = MockGradeRepository::new();
    grades.expect_exists().returning(|_| Ok(true));
    grades.expect_update().times(0);

    let mut students = MockStudentRepository::new();
    students.expect_exists().with(eq(12)).returning(|_| Ok(false));

    let service = service(students, MockCourseRepository::new(), grades);
    let result = service
        .update_grade(5, None, input(12, 1, Some("C (73-76)")))
        .await;

    assert!(matches!(result, Err(AppError::UnknownStudent(12))));
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let mut grades = MockGradeRepository::new();
    grades.expect_exists().returning(|_| Ok(true));
    grades
        .expect_update()
        .with(
            eq(5),
            eq(GradeChanges {
                student_id: 2,
                course_id: 3,
                grade_value: "D- (60-62)".to_string(),
            }),
        )
        .times(1)
        .returning(|id, changes| {
            Ok(Grade {
                id,
                student_id: changes.student_id,
                course_id: changes.course_id,
                grade_value: changes.grade_value,
                date_entered: Utc::now(),
                entered_by_teacher_id: 1,
            })
        });

    let mut students = MockStudentRepository::new();
    students.expect_exists().returning(|_| Ok(true));
    let mut courses = MockCourseRepository::new();
    courses.expect_exists().returning(|_| Ok(true));

    let service = service(students, courses, grades);
    let result = service
        .update_grade(5, Some(5), input(2, 3, Some("D- (60-62)")))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_missing_grade_is_not_found() {
    let mut grades = MockGradeRepository::new();
    grades
        .expect_delete()
        .with(eq(8))
        .returning(|_| Err(AppError::NotFound));

    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        grades,
    );

    assert!(matches!(
        service.delete_grade(8).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_get_missing_grade_is_not_found() {
    let mut grades = MockGradeRepository::new();
    grades.expect_find_by_id().returning(|_| Ok(None));

    let service = service(
        MockStudentRepository::new(),
        MockCourseRepository::new(),
        grades,
    );

    assert!(matches!(service.get_grade(3).await, Err(AppError::NotFound)));
}
