//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::config::ROLE_TEACHER;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

/// Data needed to persist a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl NewUser {
    /// New user with `role`, or the teacher role when none is given.
    pub fn new(username: String, email: String, password_hash: String, role: Option<String>) -> Self {
        let role = role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| ROLE_TEACHER.to_string());

        Self {
            username,
            email,
            password_hash,
            role,
        }
    }
}
