//! Grade handlers.
//!
//! The entering teacher is always the authenticated caller; any
//! `enteredByTeacherId` or `dateEntered` in a request body is ignored.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{grade_scale::ALLOWED_GRADES, GradeResponse};
use crate::errors::AppResult;
use crate::services::GradeInput;
use crate::types::{Created, NoContent};

/// Grade create/replace request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    /// Ignored on create; on update it must match the path ID when given
    pub id: Option<i32>,
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = 1)]
    pub course_id: i32,
    /// One of the labels from `/api/grade-scale`
    #[schema(example = "B+ (87-89)")]
    pub grade_value: Option<String>,
}

impl GradeRequest {
    fn into_input(self) -> (Option<i32>, GradeInput) {
        (
            self.id,
            GradeInput {
                student_id: self.student_id,
                course_id: self.course_id,
                grade_value: self.grade_value,
            },
        )
    }
}

/// Create grade routes
pub fn grade_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_grades).post(create_grade))
        .route("/student/:id", get(grades_for_student))
        .route("/course/:id", get(grades_for_course))
        .route("/:id", get(get_grade).put(update_grade).delete(delete_grade))
}

/// Create grade scale routes
pub fn grade_scale_routes() -> Router<AppState> {
    Router::new().route("/", get(grade_scale))
}

/// List all grades
#[utoipa::path(
    get,
    path = "/api/grades",
    tag = "Grades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All grades with student and course summaries", body = Vec<GradeResponse>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_grades(State(state): State<AppState>) -> AppResult<Json<Vec<GradeResponse>>> {
    let grades = state.grade_service.list_grades().await?;
    Ok(Json(grades.into_iter().map(GradeResponse::from).collect()))
}

/// Grades recorded for one student
#[utoipa::path(
    get,
    path = "/api/grades/student/{id}",
    tag = "Grades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "The student's grades", body = Vec<GradeResponse>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn grades_for_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<GradeResponse>>> {
    let grades = state.grade_service.grades_for_student(id).await?;
    Ok(Json(grades.into_iter().map(GradeResponse::from).collect()))
}

/// Grades recorded in one course
#[utoipa::path(
    get,
    path = "/api/grades/course/{id}",
    tag = "Grades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "The course's grades", body = Vec<GradeResponse>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn grades_for_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<GradeResponse>>> {
    let grades = state.grade_service.grades_for_course(id).await?;
    Ok(Json(grades.into_iter().map(GradeResponse::from).collect()))
}

/// Get grade by ID
#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    tag = "Grades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade", body = GradeResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Grade not found")
    )
)]
pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GradeResponse>> {
    let grade = state.grade_service.get_grade(id).await?;
    Ok(Json(GradeResponse::from(grade)))
}

/// Record a grade as the authenticated teacher
#[utoipa::path(
    post,
    path = "/api/grades",
    tag = "Grades",
    security(("bearer_auth" = [])),
    request_body = GradeRequest,
    responses(
        (status = 201, description = "Grade created", body = GradeResponse),
        (status = 400, description = "Invalid grade value, unknown student or unknown course"),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn create_grade(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GradeRequest>,
) -> AppResult<Created<GradeResponse>> {
    let (_, input) = payload.into_input();
    let grade = state
        .grade_service
        .create_grade(input, current_user.id)
        .await?;

    Ok(Created::at("/api/grades", grade.grade.id, GradeResponse::from(grade)))
}

/// Replace student, course and value of a grade
#[utoipa::path(
    put,
    path = "/api/grades/{id}",
    tag = "Grades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Grade ID")),
    request_body = GradeRequest,
    responses(
        (status = 204, description = "Grade updated"),
        (status = 400, description = "ID mismatch, invalid grade value or unknown reference"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Grade not found"),
        (status = 409, description = "Concurrent modification")
    )
)]
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<GradeRequest>,
) -> AppResult<NoContent> {
    let (body_id, input) = payload.into_input();
    state.grade_service.update_grade(id, body_id, input).await?;
    Ok(NoContent)
}

/// Delete a grade
#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    tag = "Grades",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Grade ID")),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Grade not found")
    )
)]
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.grade_service.delete_grade(id).await?;
    Ok(NoContent)
}

/// Allowed grade labels, highest first
#[utoipa::path(
    get,
    path = "/api/grade-scale",
    tag = "Grades",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Allowed grade values", body = Vec<String>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn grade_scale() -> Json<&'static [&'static str]> {
    Json(&ALLOWED_GRADES[..])
}
