//! Student repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::base;
use super::entities::grade::{self, Entity as GradeEntity};
use super::entities::student::{self, ActiveModel, Entity as StudentEntity};
use crate::domain::{NewStudent, Student};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ENTITY: &str = "Student";

/// Student repository trait for dependency injection.
///
/// Deleting a student that grades still reference fails with
/// `ReferentialConflict`; nothing cascades.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// List all students ordered by ID
    async fn list(&self) -> AppResult<Vec<Student>>;

    /// Find student by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Student>>;

    /// Whether a student with this ID exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Create a new student
    async fn create(&self, student: NewStudent) -> AppResult<Student>;

    /// Replace all fields of an existing student
    async fn update(&self, updated: Student) -> AppResult<Student>;

    /// Delete a student no grade references
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of StudentRepository
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn list(&self) -> AppResult<Vec<Student>> {
        list(&self.db, None).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Student::from))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        base::exists::<StudentEntity, _>(&self.db, id).await
    }

    async fn create(&self, student: NewStudent) -> AppResult<Student> {
        insert(&self.db, student).await
    }

    async fn update(&self, updated: Student) -> AppResult<Student> {
        let current = StudentEntity::find_by_id(updated.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let result = StudentEntity::update_many()
            .col_expr(student::Column::FirstName, Expr::value(updated.first_name.clone()))
            .col_expr(student::Column::LastName, Expr::value(updated.last_name.clone()))
            .col_expr(student::Column::Email, Expr::value(updated.email.clone()))
            .col_expr(
                student::Column::Version,
                Expr::col(student::Column::Version).add(1),
            )
            .filter(student::Column::Id.eq(updated.id))
            .filter(student::Column::Version.eq(current.version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(base::stale_write::<StudentEntity, _>(&self.db, updated.id, ENTITY).await);
        }

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        if !base::exists::<StudentEntity, _>(&self.db, id).await? {
            return Err(AppError::NotFound);
        }

        let referencing = GradeEntity::find()
            .filter(grade::Column::StudentId.eq(id))
            .count(&self.db)
            .await?;
        if referencing > 0 {
            return Err(AppError::referential_conflict(ENTITY));
        }

        let result = StudentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| base::delete_error(e, ENTITY))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Students ordered by ID, optionally only the first `limit`.
pub(crate) async fn list<C: ConnectionTrait>(db: &C, limit: Option<u64>) -> AppResult<Vec<Student>> {
    let mut query = StudentEntity::find().order_by_asc(student::Column::Id);
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let models = query.all(db).await?;

    Ok(models.into_iter().map(Student::from).collect())
}

pub(crate) async fn count<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    Ok(StudentEntity::find().count(db).await?)
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, student: NewStudent) -> AppResult<Student> {
    let active_model = ActiveModel {
        first_name: Set(student.first_name),
        last_name: Set(student.last_name),
        email: Set(student.email),
        version: Set(0),
        ..Default::default()
    };

    let model = active_model.insert(db).await?;
    Ok(Student::from(model))
}
