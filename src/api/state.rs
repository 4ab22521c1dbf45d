//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CourseService, GradeService, ServiceContainer, Services, StudentService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Student service
    pub student_service: Arc<dyn StudentService>,
    /// Course service
    pub course_service: Arc<dyn CourseService>,
    /// Grade management service
    pub grade_service: Arc<dyn GradeService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Configuration the router reads (CORS policy)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), &config);
        Self::from_services(&container, database, config)
    }

    /// Create application state from any service container.
    pub fn from_services(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            student_service: container.students(),
            course_service: container.courses(),
            grade_service: container.grades(),
            database,
            config: Arc::new(config),
        }
    }
}
