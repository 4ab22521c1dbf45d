//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod course;
pub mod grade;
pub mod grade_scale;
pub mod password;
pub mod student;
pub mod user;

pub use course::{Course, CourseResponse, NewCourse};
pub use grade::{Grade, GradeChanges, GradeDetails, GradeResponse, NewGrade};
pub use password::{Argon2Hasher, PasswordHasher};
pub use student::{NewStudent, Student, StudentResponse};
pub use user::{NewUser, User};
