//! Query helpers shared by every repository.
//!
//! Generic over `ConnectionTrait` so the same code runs on a pooled
//! connection or inside a transaction.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait, RuntimeErr, SqlErr};

use crate::errors::{AppError, AppResult};

/// Whether a row with primary key `id` exists.
pub(crate) async fn exists<E, C>(db: &C, id: i32) -> AppResult<bool>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    Ok(E::find_by_id(id).one(db).await?.is_some())
}

/// Explain a versioned write that matched no row.
///
/// The row is re-read: if it is gone the write targeted a missing row,
/// otherwise another writer bumped its version first.
pub(crate) async fn stale_write<E, C>(db: &C, id: i32, entity: &str) -> AppError
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    match exists::<E, C>(db, id).await {
        Ok(false) => AppError::NotFound,
        Ok(true) => {
            tracing::warn!(entity, id, "Concurrent modification detected");
            AppError::conflict(format!("{} {} was modified by another request", entity, id))
        }
        Err(e) => e,
    }
}

/// SQLite reports an `ON DELETE RESTRICT` violation as SQLITE_CONSTRAINT_TRIGGER.
const SQLITE_RESTRICT_VIOLATION: &str = "1811";

/// Map a failed delete: a foreign key violation means grades still point here.
pub(crate) fn delete_error(err: DbErr, entity: &str) -> AppError {
    let restricted = matches!(
        err.sql_err(),
        Some(SqlErr::ForeignKeyConstraintViolation(_))
    ) || database_code(&err).as_deref() == Some(SQLITE_RESTRICT_VIOLATION);

    if restricted {
        AppError::referential_conflict(entity)
    } else {
        AppError::from(err)
    }
}

/// Driver-level error code of a failed statement, if any.
fn database_code(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e))) => {
            e.code().map(|code| code.into_owned())
        }
        _ => None,
    }
}

/// Map a failed grade write: a foreign key violation means a referenced row vanished.
pub(crate) fn reference_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::conflict("A referenced student, course or teacher no longer exists")
        }
        _ => AppError::from(err),
    }
}

/// Map a failed user insert: a unique violation means the identity is taken.
pub(crate) fn identity_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateIdentity,
        _ => AppError::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{sea_query::Expr, ColumnTrait, QueryFilter};

    use crate::domain::{NewCourse, NewGrade, NewStudent, NewUser};
    use crate::infra::repositories::entities::course::Entity as CourseEntity;
    use crate::infra::repositories::entities::student::{self, Entity as StudentEntity};
    use crate::infra::repositories::{
        course_repository, grade_repository, student_repository, user_repository,
    };
    use crate::infra::Database;

    async fn database() -> Database {
        Database::connect("sqlite::memory:").await.unwrap()
    }

    async fn student<C: ConnectionTrait>(db: &C) -> i32 {
        student_repository::insert(
            db,
            NewStudent {
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                email: "ann@x.com".into(),
            },
        )
        .await
        .unwrap()
        .id
    }

    /// Student and course ids with one grade pointing at both.
    async fn graded<C: ConnectionTrait>(db: &C) -> (i32, i32) {
        let teacher = user_repository::insert(
            db,
            NewUser::new("alice".into(), "alice@x.com".into(), "hash".into(), None),
        )
        .await
        .unwrap();
        let student_id = student(db).await;
        let course_id = course_repository::insert(
            db,
            NewCourse {
                code: "CS101".into(),
                name: "Intro CS".into(),
            },
        )
        .await
        .unwrap()
        .id;

        grade_repository::insert(
            db,
            NewGrade {
                student_id,
                course_id,
                grade_value: "B+ (87-89)".into(),
                date_entered: Utc::now(),
                entered_by_teacher_id: teacher.id,
            },
        )
        .await
        .unwrap();

        (student_id, course_id)
    }

    #[tokio::test]
    async fn test_write_against_bumped_version_is_conflict() {
        let db = database().await;
        let conn = db.connection();
        let id = student(conn).await;

        let read = StudentEntity::find_by_id(id).one(conn).await.unwrap().unwrap();

        // Another writer lands between our read and our write
        StudentEntity::update_many()
            .col_expr(student::Column::Version, Expr::value(read.version + 1))
            .filter(student::Column::Id.eq(id))
            .exec(conn)
            .await
            .unwrap();

        let result = StudentEntity::update_many()
            .col_expr(student::Column::FirstName, Expr::value("Annie"))
            .filter(student::Column::Id.eq(id))
            .filter(student::Column::Version.eq(read.version))
            .exec(conn)
            .await
            .unwrap();
        assert_eq!(result.rows_affected, 0);

        let error = stale_write::<StudentEntity, _>(conn, id, "Student").await;
        assert!(matches!(error, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_stale_write_on_missing_row_is_not_found() {
        let db = database().await;

        let error = stale_write::<StudentEntity, _>(db.connection(), 999, "Student").await;
        assert!(matches!(error, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_database_restrict_on_delete_is_referential_conflict() {
        let db = database().await;
        let conn = db.connection();
        let (student_id, course_id) = graded(conn).await;

        let student = StudentEntity::delete_by_id(student_id)
            .exec(conn)
            .await
            .map_err(|e| delete_error(e, "Student"));
        assert!(matches!(student, Err(AppError::ReferentialConflict(_))));

        let course = CourseEntity::delete_by_id(course_id)
            .exec(conn)
            .await
            .map_err(|e| delete_error(e, "Course"));
        assert!(matches!(course, Err(AppError::ReferentialConflict(_))));
    }

    #[tokio::test]
    async fn test_grade_with_missing_reference_is_conflict() {
        let db = database().await;
        let conn = db.connection();
        let (_, course_id) = graded(conn).await;

        let result = grade_repository::insert(
            conn,
            NewGrade {
                student_id: 999,
                course_id,
                grade_value: "C (73-76)".into(),
                date_entered: Utc::now(),
                entered_by_teacher_id: 1,
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unrelated_database_error_is_not_remapped() {
        let error = delete_error(DbErr::Custom("boom".into()), "Student");
        assert!(matches!(error, AppError::Database(_)));
    }
}
