//! Grade management service - Validated creation and update of grades.
//!
//! Checks run in a fixed order so the reported error is deterministic:
//! the grade value first, then the referenced student, then the course.
//! An invalid value is rejected before any repository is touched.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{grade_scale, GradeChanges, GradeDetails, NewGrade};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Client-supplied grade fields.
///
/// `grade_value` is optional so a missing value is reported as an
/// invalid grade rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeInput {
    pub student_id: i32,
    pub course_id: i32,
    pub grade_value: Option<String>,
}

/// Grade service trait for dependency injection.
#[async_trait]
pub trait GradeService: Send + Sync {
    async fn list_grades(&self) -> AppResult<Vec<GradeDetails>>;

    async fn grades_for_student(&self, student_id: i32) -> AppResult<Vec<GradeDetails>>;

    async fn grades_for_course(&self, course_id: i32) -> AppResult<Vec<GradeDetails>>;

    async fn get_grade(&self, id: i32) -> AppResult<GradeDetails>;

    /// Record a grade entered by `teacher_id` at the current UTC time.
    async fn create_grade(&self, input: GradeInput, teacher_id: i32) -> AppResult<GradeDetails>;

    /// Replace student, course and value of grade `id`.
    ///
    /// `body_id`, when present, must equal `id`. Entry time and teacher
    /// are preserved.
    async fn update_grade(&self, id: i32, body_id: Option<i32>, input: GradeInput) -> AppResult<()>;

    async fn delete_grade(&self, id: i32) -> AppResult<()>;
}

/// Resolve a client value to its canonical grade label.
fn validated_value(value: Option<&str>) -> AppResult<&'static str> {
    value
        .and_then(grade_scale::canonical)
        .ok_or(AppError::InvalidGradeValue)
}

/// Concrete implementation of GradeService using Unit of Work.
pub struct GradeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> GradeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_references(&self, student_id: i32, course_id: i32) -> AppResult<()> {
        if !self.uow.students().exists(student_id).await? {
            return Err(AppError::UnknownStudent(student_id));
        }
        if !self.uow.courses().exists(course_id).await? {
            return Err(AppError::UnknownCourse(course_id));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> GradeService for GradeManager<U> {
    async fn list_grades(&self) -> AppResult<Vec<GradeDetails>> {
        self.uow.grades().list().await
    }

    async fn grades_for_student(&self, student_id: i32) -> AppResult<Vec<GradeDetails>> {
        self.uow.grades().list_by_student(student_id).await
    }

    async fn grades_for_course(&self, course_id: i32) -> AppResult<Vec<GradeDetails>> {
        self.uow.grades().list_by_course(course_id).await
    }

    async fn get_grade(&self, id: i32) -> AppResult<GradeDetails> {
        self.uow.grades().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_grade(&self, input: GradeInput, teacher_id: i32) -> AppResult<GradeDetails> {
        let grade_value = validated_value(input.grade_value.as_deref())?;

        let student = self
            .uow
            .students()
            .find_by_id(input.student_id)
            .await?
            .ok_or(AppError::UnknownStudent(input.student_id))?;
        let course = self
            .uow
            .courses()
            .find_by_id(input.course_id)
            .await?
            .ok_or(AppError::UnknownCourse(input.course_id))?;

        let grade = self
            .uow
            .grades()
            .create(NewGrade {
                student_id: student.id,
                course_id: course.id,
                grade_value: grade_value.to_string(),
                date_entered: Utc::now(),
                entered_by_teacher_id: teacher_id,
            })
            .await?;

        tracing::info!(
            grade_id = grade.id,
            student_id = grade.student_id,
            course_id = grade.course_id,
            teacher_id,
            "Grade created"
        );

        Ok(GradeDetails {
            grade,
            student: Some(student),
            course: Some(course),
        })
    }

    async fn update_grade(&self, id: i32, body_id: Option<i32>, input: GradeInput) -> AppResult<()> {
        if let Some(body) = body_id.filter(|body| *body != id) {
            return Err(AppError::IdMismatch { path: id, body });
        }

        let grade_value = validated_value(input.grade_value.as_deref())?;

        if !self.uow.grades().exists(id).await? {
            return Err(AppError::NotFound);
        }
        self.ensure_references(input.student_id, input.course_id)
            .await?;

        self.uow
            .grades()
            .update(
                id,
                GradeChanges {
                    student_id: input.student_id,
                    course_id: input.course_id,
                    grade_value: grade_value.to_string(),
                },
            )
            .await?;

        tracing::info!(grade_id = id, "Grade updated");
        Ok(())
    }

    async fn delete_grade(&self, id: i32) -> AppResult<()> {
        self.uow.grades().delete(id).await?;
        tracing::info!(grade_id = id, "Grade deleted");
        Ok(())
    }
}
