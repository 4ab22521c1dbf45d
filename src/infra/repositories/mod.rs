//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Each store also exposes its queries as free functions generic over
//! the connection, which the transaction context reuses.

mod base;
pub(crate) mod course_repository;
pub(crate) mod entities;
pub(crate) mod grade_repository;
pub(crate) mod student_repository;
pub(crate) mod user_repository;

pub use course_repository::{CourseRepository, CourseStore};
pub use grade_repository::{GradeRepository, GradeStore};
pub use student_repository::{StudentRepository, StudentStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use grade_repository::MockGradeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use student_repository::MockStudentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
