//! Student service - Plain CRUD over the student repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewStudent, Student};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Student service trait for dependency injection.
#[async_trait]
pub trait StudentService: Send + Sync {
    async fn list_students(&self) -> AppResult<Vec<Student>>;

    async fn get_student(&self, id: i32) -> AppResult<Student>;

    async fn create_student(&self, student: NewStudent) -> AppResult<Student>;

    /// Replace the student at `id`; `student.id` must equal `id`.
    async fn update_student(&self, id: i32, student: Student) -> AppResult<Student>;

    /// Delete a student; rejected while any grade references it.
    async fn delete_student(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of StudentService using Unit of Work.
pub struct StudentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StudentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StudentService for StudentManager<U> {
    async fn list_students(&self) -> AppResult<Vec<Student>> {
        self.uow.students().list().await
    }

    async fn get_student(&self, id: i32) -> AppResult<Student> {
        self.uow.students().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_student(&self, student: NewStudent) -> AppResult<Student> {
        let created = self.uow.students().create(student).await?;
        tracing::info!(student_id = created.id, "Student created");
        Ok(created)
    }

    async fn update_student(&self, id: i32, student: Student) -> AppResult<Student> {
        if student.id != id {
            return Err(AppError::IdMismatch {
                path: id,
                body: student.id,
            });
        }

        self.uow.students().update(student).await
    }

    async fn delete_student(&self, id: i32) -> AppResult<()> {
        self.uow.students().delete(id).await?;
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }
}
