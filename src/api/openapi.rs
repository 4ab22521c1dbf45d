//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, course_handler, grade_handler, student_handler};
use crate::domain::{CourseResponse, GradeResponse, StudentResponse};
use crate::services::LoginResponse;

/// OpenAPI documentation for the grade entry API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grade Entry System",
        version = "0.1.0",
        description = "Record and manage student grades across courses"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Student endpoints
        student_handler::list_students,
        student_handler::get_student,
        student_handler::create_student,
        student_handler::update_student,
        student_handler::delete_student,
        // Course endpoints
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::create_course,
        course_handler::update_course,
        course_handler::delete_course,
        // Grade endpoints
        grade_handler::list_grades,
        grade_handler::grades_for_student,
        grade_handler::grades_for_course,
        grade_handler::get_grade,
        grade_handler::create_grade,
        grade_handler::update_grade,
        grade_handler::delete_grade,
        grade_handler::grade_scale,
    ),
    components(
        schemas(
            StudentResponse,
            CourseResponse,
            GradeResponse,
            LoginResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            student_handler::StudentRequest,
            course_handler::CourseRequest,
            grade_handler::GradeRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Students", description = "Student management"),
        (name = "Courses", description = "Course management"),
        (name = "Grades", description = "Grade entry against the fixed grade scale")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
