//! HTTP request handlers.

pub mod auth_handler;
pub mod course_handler;
pub mod grade_handler;
pub mod student_handler;

pub use auth_handler::auth_routes;
pub use course_handler::course_routes;
pub use grade_handler::{grade_routes, grade_scale_routes};
pub use student_handler::student_routes;
