//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use super::base;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user whose username or email equals `identifier`
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;

    /// Whether any user already has this username or this email
    async fn identity_taken(&self, username: &str, email: &str) -> AppResult<bool>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        find_by_identifier(&self.db, identifier).await
    }

    async fn identity_taken(&self, username: &str, email: &str) -> AppResult<bool> {
        identity_taken(&self.db, username, email).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        insert(&self.db, user).await
    }
}

pub(crate) async fn find_by_identifier<C: ConnectionTrait>(
    db: &C,
    identifier: &str,
) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(identifier))
                .add(user::Column::Email.eq(identifier)),
        )
        .one(db)
        .await?;

    Ok(result.map(User::from))
}

pub(crate) async fn identity_taken<C: ConnectionTrait>(
    db: &C,
    username: &str,
    email: &str,
) -> AppResult<bool> {
    let existing = UserEntity::find()
        .filter(
            Condition::any()
                .add(user::Column::Username.eq(username))
                .add(user::Column::Email.eq(email)),
        )
        .one(db)
        .await?;

    Ok(existing.is_some())
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, user: NewUser) -> AppResult<User> {
    let active_model = ActiveModel {
        username: Set(user.username),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        role: Set(user.role),
        ..Default::default()
    };

    let model = active_model.insert(db).await.map_err(base::identity_error)?;
    Ok(User::from(model))
}
