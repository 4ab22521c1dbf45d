//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod course;
pub mod grade;
pub mod student;
pub mod user;
