//! Grade repository implementation.
//!
//! Reads return [`GradeDetails`]: each grade with a one-level summary of its
//! student and course, loaded with one batched query per relation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::base;
use super::entities::course::Entity as CourseEntity;
use super::entities::grade::{self, ActiveModel, Entity as GradeEntity};
use super::entities::student::Entity as StudentEntity;
use crate::domain::{Course, Grade, GradeChanges, GradeDetails, NewGrade, Student};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "Grade";

/// Grade repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// List every grade ordered by ID
    async fn list(&self) -> AppResult<Vec<GradeDetails>>;

    /// Grades recorded for one student
    async fn list_by_student(&self, student_id: i32) -> AppResult<Vec<GradeDetails>>;

    /// Grades recorded in one course
    async fn list_by_course(&self, course_id: i32) -> AppResult<Vec<GradeDetails>>;

    /// Find grade by ID with its student and course summaries
    async fn find_by_id(&self, id: i32) -> AppResult<Option<GradeDetails>>;

    /// Whether a grade with this ID exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Persist a fully resolved grade
    async fn create(&self, grade: NewGrade) -> AppResult<Grade>;

    /// Replace student, course and value of an existing grade.
    ///
    /// `date_entered` and `entered_by_teacher_id` are left untouched.
    async fn update(&self, id: i32, changes: GradeChanges) -> AppResult<Grade>;

    /// Delete grade by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of GradeRepository
pub struct GradeStore {
    db: DatabaseConnection,
}

impl GradeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GradeRepository for GradeStore {
    async fn list(&self) -> AppResult<Vec<GradeDetails>> {
        load_details(&self.db, GradeEntity::find()).await
    }

    async fn list_by_student(&self, student_id: i32) -> AppResult<Vec<GradeDetails>> {
        let query = GradeEntity::find().filter(grade::Column::StudentId.eq(student_id));
        load_details(&self.db, query).await
    }

    async fn list_by_course(&self, course_id: i32) -> AppResult<Vec<GradeDetails>> {
        let query = GradeEntity::find().filter(grade::Column::CourseId.eq(course_id));
        load_details(&self.db, query).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<GradeDetails>> {
        let query = GradeEntity::find_by_id(id);
        Ok(load_details(&self.db, query).await?.into_iter().next())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        base::exists::<GradeEntity, _>(&self.db, id).await
    }

    async fn create(&self, grade: NewGrade) -> AppResult<Grade> {
        insert(&self.db, grade).await
    }

    async fn update(&self, id: i32, changes: GradeChanges) -> AppResult<Grade> {
        let current = GradeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let result = GradeEntity::update_many()
            .col_expr(grade::Column::StudentId, Expr::value(changes.student_id))
            .col_expr(grade::Column::CourseId, Expr::value(changes.course_id))
            .col_expr(
                grade::Column::GradeValue,
                Expr::value(changes.grade_value.clone()),
            )
            .col_expr(
                grade::Column::Version,
                Expr::col(grade::Column::Version).add(1),
            )
            .filter(grade::Column::Id.eq(id))
            .filter(grade::Column::Version.eq(current.version))
            .exec(&self.db)
            .await
            .map_err(base::reference_error)?;

        if result.rows_affected == 0 {
            return Err(base::stale_write::<GradeEntity, _>(&self.db, id, ENTITY).await);
        }

        Ok(Grade {
            id,
            student_id: changes.student_id,
            course_id: changes.course_id,
            grade_value: changes.grade_value,
            date_entered: current.date_entered,
            entered_by_teacher_id: current.entered_by_teacher_id,
        })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = GradeEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Run `query` ordered by ID and attach student and course summaries.
async fn load_details<C: ConnectionTrait>(
    db: &C,
    query: Select<GradeEntity>,
) -> AppResult<Vec<GradeDetails>> {
    let grades = query.order_by_asc(grade::Column::Id).all(db).await?;
    let students = grades.load_one(StudentEntity, db).await?;
    let courses = grades.load_one(CourseEntity, db).await?;

    Ok(grades
        .into_iter()
        .zip(students)
        .zip(courses)
        .map(|((grade, student), course)| GradeDetails {
            grade: Grade::from(grade),
            student: student.map(Student::from),
            course: course.map(Course::from),
        })
        .collect())
}

pub(crate) async fn count<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    Ok(GradeEntity::find().count(db).await?)
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, grade: NewGrade) -> AppResult<Grade> {
    let active_model = ActiveModel {
        student_id: Set(grade.student_id),
        course_id: Set(grade.course_id),
        grade_value: Set(grade.grade_value),
        date_entered: Set(grade.date_entered),
        entered_by_teacher_id: Set(grade.entered_by_teacher_id),
        version: Set(0),
        ..Default::default()
    };

    let model = active_model
        .insert(db)
        .await
        .map_err(base::reference_error)?;
    Ok(Grade::from(model))
}
