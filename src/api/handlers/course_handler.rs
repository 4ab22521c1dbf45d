//! Course handlers.

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
use crate::domain::{Course, CourseResponse, NewCourse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Course create/replace request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    /// Ignored on create; on update it must match the path ID when given
    pub id: Option<i32>,
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "CS101")]
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Intro CS")]
    pub name: String,
}

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All courses", body = Vec<CourseResponse>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<CourseResponse>>> {
    let courses = state.course_service.list_courses().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CourseResponse>> {
    let course = state.course_service.get_course(id).await?;
    Ok(Json(CourseResponse::from(course)))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CourseRequest>,
) -> AppResult<Created<CourseResponse>> {
    let course = state
        .course_service
        .create_course(NewCourse {
            code: payload.code,
            name: payload.name,
        })
        .await?;

    Ok(Created::at("/api/courses", course.id, CourseResponse::from(course)))
}

/// Replace a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    request_body = CourseRequest,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Validation error or ID mismatch"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Concurrent modification")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CourseRequest>,
) -> AppResult<NoContent> {
    state
        .course_service
        .update_course(
            id,
            Course {
                id: payload.id.unwrap_or(id),
                code: payload.code,
                name: payload.name,
            },
        )
        .await?;

    Ok(NoContent)
}

/// Delete a course no grade references
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Course still has grades")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.course_service.delete_course(id).await?;
    Ok(NoContent)
}
