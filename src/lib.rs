//! Grade Entry System - a small multi-user backend for teachers to
//! record student grades across courses.
//!
//! Teachers authenticate with a JWT, manage students and courses, and
//! enter grades drawn from a fixed twelve-label grade scale.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities, the grade scale and password hashing policy
//! - **services**: Authentication, CRUD and grade management use cases
//! - **infra**: Database, migrations, repositories and Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server, inserting demo data into empty tables
//! cargo run -- serve --seed
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Insert demo data only
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Course, Grade, Student, User};
pub use errors::{AppError, AppResult};
