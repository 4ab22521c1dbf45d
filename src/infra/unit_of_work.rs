//! Unit of Work pattern implementation.
//!
//! The Unit of Work:
//! - Centralizes access to all repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Hands transaction-scoped repositories to multi-step workflows

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

use super::repositories::{
    course_repository, grade_repository, student_repository, user_repository, CourseRepository,
    CourseStore, GradeRepository, GradeStore, StudentRepository, StudentStore, UserRepository,
    UserStore,
};
use crate::domain::{Course, Grade, NewCourse, NewGrade, NewStudent, NewUser, Student, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to the generic method.
/// For testing, implement it over the repository mocks.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get student repository
    fn students(&self) -> Arc<dyn StudentRepository>;

    /// Get course repository
    fn courses(&self) -> Arc<dyn CourseRepository>;

    /// Get grade repository
    fn grades(&self) -> Arc<dyn GradeRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn students(&self) -> TxStudentRepository<'_> {
        TxStudentRepository { txn: self.txn }
    }

    pub fn courses(&self) -> TxCourseRepository<'_> {
        TxCourseRepository { txn: self.txn }
    }

    pub fn grades(&self) -> TxGradeRepository<'_> {
        TxGradeRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    student_repo: Arc<StudentStore>,
    course_repo: Arc<CourseStore>,
    grade_repo: Arc<GradeStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            student_repo: Arc::new(StudentStore::new(db.clone())),
            course_repo: Arc::new(CourseStore::new(db.clone())),
            grade_repo: Arc::new(GradeStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn students(&self) -> Arc<dyn StudentRepository> {
        self.student_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    fn grades(&self) -> Arc<dyn GradeRepository> {
        self.grade_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    pub async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        user_repository::find_by_identifier(self.txn, identifier).await
    }

    pub async fn create(&self, user: NewUser) -> AppResult<User> {
        user_repository::insert(self.txn, user).await
    }
}

/// Transaction-aware student repository.
pub struct TxStudentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxStudentRepository<'_> {
    pub async fn count(&self) -> AppResult<u64> {
        student_repository::count(self.txn).await
    }

    /// First `limit` students by ID
    pub async fn first(&self, limit: u64) -> AppResult<Vec<Student>> {
        student_repository::list(self.txn, Some(limit)).await
    }

    pub async fn create(&self, student: NewStudent) -> AppResult<Student> {
        student_repository::insert(self.txn, student).await
    }
}

/// Transaction-aware course repository.
pub struct TxCourseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxCourseRepository<'_> {
    pub async fn count(&self) -> AppResult<u64> {
        course_repository::count(self.txn).await
    }

    /// First `limit` courses by ID
    pub async fn first(&self, limit: u64) -> AppResult<Vec<Course>> {
        course_repository::list(self.txn, Some(limit)).await
    }

    pub async fn create(&self, course: NewCourse) -> AppResult<Course> {
        course_repository::insert(self.txn, course).await
    }
}

/// Transaction-aware grade repository.
pub struct TxGradeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxGradeRepository<'_> {
    pub async fn count(&self) -> AppResult<u64> {
        grade_repository::count(self.txn).await
    }

    pub async fn create(&self, grade: NewGrade) -> AppResult<Grade> {
        grade_repository::insert(self.txn, grade).await
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
