//! Service Container - Centralized service access.
//!
//! Holds every application service behind its trait, wired over one
//! Unit of Work.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CourseManager, CourseService, GradeManager, GradeService,
    StudentManager, StudentService,
};
use crate::config::Config;
use crate::domain::{Argon2Hasher, PasswordHasher};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get student service
    fn students(&self) -> Arc<dyn StudentService>;

    /// Get course service
    fn courses(&self) -> Arc<dyn CourseService>;

    /// Get grade management service
    fn grades(&self) -> Arc<dyn GradeService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    student_service: Arc<dyn StudentService>,
    course_service: Arc<dyn CourseService>,
    grade_service: Arc<dyn GradeService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), hasher, config.jwt.clone())),
            student_service: Arc::new(StudentManager::new(uow.clone())),
            course_service: Arc::new(CourseManager::new(uow.clone())),
            grade_service: Arc::new(GradeManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn students(&self) -> Arc<dyn StudentService> {
        self.student_service.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }

    fn grades(&self) -> Arc<dyn GradeService> {
        self.grade_service.clone()
    }
}
