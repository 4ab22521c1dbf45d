//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through the Unit of Work.

mod auth_service;
pub mod container;
mod course_service;
mod grade_service;
mod seed_service;
mod student_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    decode_token, issue_token, AuthService, Authenticator, Claims, LoginResponse,
};
pub use course_service::{CourseManager, CourseService};
pub use grade_service::{GradeInput, GradeManager, GradeService};
pub use seed_service::{SeedReport, Seeder};
pub use student_service::{StudentManager, StudentService};
