//! Course repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::base;
use super::entities::grade::{self, Entity as GradeEntity};
use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::{Course, NewCourse};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "Course";

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List all courses ordered by ID
    async fn list(&self) -> AppResult<Vec<Course>>;

    /// Find course by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>>;

    /// Whether a course with this ID exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Create a new course
    async fn create(&self, course: NewCourse) -> AppResult<Course>;

    /// Replace code and name of an existing course
    async fn update(&self, updated: Course) -> AppResult<Course>;

    /// Delete a course; fails with `ReferentialConflict` while grades reference it
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CourseRepository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list(&self) -> AppResult<Vec<Course>> {
        list(&self.db, None).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Course::from))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        base::exists::<CourseEntity, _>(&self.db, id).await
    }

    async fn create(&self, course: NewCourse) -> AppResult<Course> {
        insert(&self.db, course).await
    }

    async fn update(&self, updated: Course) -> AppResult<Course> {
        let current = CourseEntity::find_by_id(updated.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let result = CourseEntity::update_many()
            .col_expr(course::Column::Code, Expr::value(updated.code.clone()))
            .col_expr(course::Column::Name, Expr::value(updated.name.clone()))
            .col_expr(
                course::Column::Version,
                Expr::col(course::Column::Version).add(1),
            )
            .filter(course::Column::Id.eq(updated.id))
            .filter(course::Column::Version.eq(current.version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(base::stale_write::<CourseEntity, _>(&self.db, updated.id, ENTITY).await);
        }

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        if !base::exists::<CourseEntity, _>(&self.db, id).await? {
            return Err(AppError::NotFound);
        }

        let referencing = GradeEntity::find()
            .filter(grade::Column::CourseId.eq(id))
            .count(&self.db)
            .await?;
        if referencing > 0 {
            return Err(AppError::referential_conflict(ENTITY));
        }

        let result = CourseEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| base::delete_error(e, ENTITY))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Courses ordered by ID, optionally only the first `limit`.
pub(crate) async fn list<C: ConnectionTrait>(db: &C, limit: Option<u64>) -> AppResult<Vec<Course>> {
    let mut query = CourseEntity::find().order_by_asc(course::Column::Id);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let models = query.all(db).await?;

    Ok(models.into_iter().map(Course::from).collect())
}

pub(crate) async fn count<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    Ok(CourseEntity::find().count(db).await?)
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, course: NewCourse) -> AppResult<Course> {
    let active_model = ActiveModel {
        code: Set(course.code),
        name: Set(course.name),
        version: Set(0),
        ..Default::default()
    };

    let model = active_model.insert(db).await?;
    Ok(Course::from(model))
}
