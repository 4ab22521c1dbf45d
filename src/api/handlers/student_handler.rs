//! Student handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewStudent, Student, StudentResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Student create/replace request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    /// Ignored on create; on update it must match the path ID when given
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Ann")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Lee")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ann@x.com")]
    pub email: String,
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All students", body = Vec<StudentResponse>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<StudentResponse>>> {
    let students = state.student_service.list_students().await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<StudentResponse>> {
    let student = state.student_service.get_student(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "Students",
    security(("bearer_auth" = [])),
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<StudentRequest>,
) -> AppResult<Created<StudentResponse>> {
    let student = state
        .student_service
        .create_student(NewStudent {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
        })
        .await?;

    Ok(Created::at("/api/students", student.id, StudentResponse::from(student)))
}

/// Replace a student
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentRequest,
    responses(
        (status = 204, description = "Student updated"),
        (status = 400, description = "Validation error or ID mismatch"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Concurrent modification")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StudentRequest>,
) -> AppResult<NoContent> {
    state
        .student_service
        .update_student(
            id,
            Student {
                id: payload.id.unwrap_or(id),
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
            },
        )
        .await?;

    Ok(NoContent)
}

/// Delete a student no grade references
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "Students",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Student still has grades")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.student_service.delete_student(id).await?;
    Ok(NoContent)
}
