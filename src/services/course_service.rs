//! Course service - Plain CRUD over the course repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Course, NewCourse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Course service trait for dependency injection.
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    async fn get_course(&self, id: i32) -> AppResult<Course>;

    async fn create_course(&self, course: NewCourse) -> AppResult<Course>;

    /// Replace the course at `id`; `course.id` must equal `id`.
    async fn update_course(&self, id: i32, course: Course) -> AppResult<Course>;

    /// Delete a course; rejected while any grade references it.
    async fn delete_course(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CourseService using Unit of Work.
pub struct CourseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CourseManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseManager<U> {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.uow.courses().list().await
    }

    async fn get_course(&self, id: i32) -> AppResult<Course> {
        self.uow.courses().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_course(&self, course: NewCourse) -> AppResult<Course> {
        let created = self.uow.courses().create(course).await?;
        tracing::info!(course_id = created.id, code = %created.code, "Course created");
        Ok(created)
    }

    async fn update_course(&self, id: i32, course: Course) -> AppResult<Course> {
        if course.id != id {
            return Err(AppError::IdMismatch {
                path: id,
                body: course.id,
            });
        }

        self.uow.courses().update(course).await
    }

    async fn delete_course(&self, id: i32) -> AppResult<()> {
        self.uow.courses().delete(id).await?;
        tracing::info!(course_id = id, "Course deleted");
        Ok(())
    }
}
