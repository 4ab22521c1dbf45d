//! Shared test doubles.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use grade_entry::domain::{Course, Student};
use grade_entry::errors::{AppError, AppResult};
use grade_entry::infra::{
    CourseRepository, GradeRepository, MockCourseRepository, MockGradeRepository,
    MockStudentRepository, MockUserRepository, StudentRepository, TransactionContext,
    UnitOfWork, UserRepository,
};

/// UnitOfWork over mockall repositories.
///
/// A repository left without expectations panics when called, which is
/// how tests prove a code path never reached persistence.
pub struct TestUnitOfWork {
    pub users: Arc<MockUserRepository>,
    pub students: Arc<MockStudentRepository>,
    pub courses: Arc<MockCourseRepository>,
    pub grades: Arc<MockGradeRepository>,
}

impl TestUnitOfWork {
    pub fn new(
        users: MockUserRepository,
        students: MockStudentRepository,
        courses: MockCourseRepository,
        grades: MockGradeRepository,
    ) -> Self {
        Self {
            users: Arc::new(users),
            students: Arc::new(students),
            courses: Arc::new(courses),
            grades: Arc::new(grades),
        }
    }

    pub fn with_users(users: MockUserRepository) -> Self {
        Self::new(
            users,
            MockStudentRepository::new(),
            MockCourseRepository::new(),
            MockGradeRepository::new(),
        )
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn students(&self) -> Arc<dyn StudentRepository> {
        self.students.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.courses.clone()
    }

    fn grades(&self) -> Arc<dyn GradeRepository> {
        self.grades.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn student(id: i32) -> Student {
    Student {
        id,
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@x.com".to_string(),
    }
}

pub fn course(id: i32) -> Course {
    Course {
        id,
        code: "CS101".to_string(),
        name: "Intro CS".to_string(),
    }
}
