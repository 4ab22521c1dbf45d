//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::grade_scale::ALLOWED_GRADES;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username or email already exists")]
    DuplicateIdentity,

    // Grade validation
    #[error("Invalid gradeValue. Please choose a valid grade option.")]
    InvalidGradeValue,

    #[error("Student with ID {0} not found")]
    UnknownStudent(i32),

    #[error("Course with ID {0} not found")]
    UnknownCourse(i32),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Path id {path} does not match body id {body}")]
    IdMismatch { path: i32, body: i32 },

    #[error("{0} is still referenced by grades")]
    ReferentialConflict(String),

    #[error("{0}")]
    Conflict(String),

    // Request validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl AppError {
    /// Machine-stable error code for clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::DuplicateIdentity => "DUPLICATE_IDENTITY",
            AppError::InvalidGradeValue => "INVALID_GRADE_VALUE",
            AppError::UnknownStudent(_) => "UNKNOWN_STUDENT",
            AppError::UnknownCourse(_) => "UNKNOWN_COURSE",
            AppError::NotFound => "NOT_FOUND",
            AppError::IdMismatch { .. } => "ID_MISMATCH",
            AppError::ReferentialConflict(_) => "REFERENTIAL_CONFLICT",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "UNAUTHENTICATED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::DuplicateIdentity
            | AppError::InvalidGradeValue
            | AppError::UnknownStudent(_)
            | AppError::UnknownCourse(_)
            | AppError::IdMismatch { .. }
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ReferentialConflict(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Structured detail supporting client-side correction
    fn details(&self) -> Option<Value> {
        match self {
            AppError::InvalidGradeValue => Some(json!({ "allowedValues": ALLOWED_GRADES })),
            AppError::UnknownStudent(id) => Some(json!({ "studentId": id })),
            AppError::UnknownCourse(id) => Some(json!({ "courseId": id })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.user_message(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn referential_conflict(entity: impl Into<String>) -> Self {
        AppError::ReferentialConflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_grade_carries_allowed_values() {
        let (status, body) = body_json(AppError::InvalidGradeValue).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_GRADE_VALUE");
        let allowed = body["error"]["details"]["allowedValues"].as_array().unwrap();
        assert_eq!(allowed.len(), 12);
        assert_eq!(allowed[0], "A (93-100)");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = body_json(AppError::internal("connection pool exhausted")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::DuplicateIdentity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UnknownStudent(3).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::IdMismatch { path: 1, body: 2 }.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::referential_conflict("Student").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::conflict("changed").status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(4).ok_or_not_found().unwrap(), 4);
    }
}
