//! Authentication service - Handles user authentication and token issuance.
//!
//! Password hashing is delegated to the domain `PasswordHasher` policy and
//! user lookups go through the Unit of Work.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::JwtSettings;
use crate::domain::{NewUser, PasswordHasher, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Password hashed once to give unknown identifiers a real hash to verify against
const DUMMY_PASSWORD: &str = "grade-entry-dummy-password";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i32,
    /// Username
    pub name: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after login or registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Teacher")]
    pub role: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and log them in.
    ///
    /// Fails with `DuplicateIdentity` if the username or the email is taken.
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        role: Option<String>,
    ) -> AppResult<LoginResponse>;

    /// Login by username or email and return a JWT.
    ///
    /// Unknown identifier and wrong password fail identically.
    async fn login(&self, identifier: String, password: String) -> AppResult<LoginResponse>;

    /// Verify signature, issuer, audience and expiry; return the claims.
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Sign a token for `user` with the configured issuer, audience and lifetime.
pub fn issue_token(user: &User, jwt: &JwtSettings) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = jwt
        .expires_at()
        .ok_or_else(|| AppError::internal("Token expiry is out of range"))?;

    let claims = Claims {
        sub: user.id,
        name: user.username.clone(),
        email: user.email.clone(),
        role: user.role.clone(),
        iss: jwt.issuer.clone(),
        aud: jwt.audience.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt.secret_bytes()),
    )?)
}

/// Decode `token`, checking signature, issuer, audience and expiry.
pub fn decode_token(token: &str, jwt: &JwtSettings) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[jwt.issuer.as_str()]);
    validation.set_audience(&[jwt.audience.as_str()]);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    jwt: JwtSettings,
    dummy_hash: OnceCell<String>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, hasher: Arc<dyn PasswordHasher>, jwt: JwtSettings) -> Self {
        Self {
            uow,
            hasher,
            jwt,
            dummy_hash: OnceCell::new(),
        }
    }

    fn dummy_hash(&self) -> &str {
        self.dummy_hash
            .get_or_init(|| self.hasher.hash(DUMMY_PASSWORD).unwrap_or_default())
    }

    fn respond(&self, user: &User) -> AppResult<LoginResponse> {
        Ok(LoginResponse {
            token: issue_token(user, &self.jwt)?,
            username: user.username.clone(),
            role: user.role.clone(),
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        role: Option<String>,
    ) -> AppResult<LoginResponse> {
        if self.uow.users().identity_taken(&username, &email).await? {
            return Err(AppError::DuplicateIdentity);
        }

        let password_hash = self.hasher.hash(&password)?;
        let user = self
            .uow
            .users()
            .create(NewUser::new(username, email, password_hash, role))
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        self.respond(&user)
    }

    async fn login(&self, identifier: String, password: String) -> AppResult<LoginResponse> {
        let user = self.uow.users().find_by_identifier(&identifier).await?;

        // Verify even when the user is unknown so both failures cost the same.
        let stored_hash = match &user {
            Some(user) => user.password_hash.as_str(),
            None => self.dummy_hash(),
        };
        let password_valid = self.hasher.verify(&password, stored_hash);

        match user {
            Some(user) if password_valid => self.respond(&user),
            _ => {
                tracing::warn!("Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode_token(token, &self.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings::new(secret, "GradeEntrySystem", "GradeEntrySystemClient", 60).unwrap()
    }

    fn alice() -> User {
        User {
            id: 7,
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: String::new(),
            role: "Teacher".into(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let jwt = settings("0123456789abcdef0123456789abcdef");
        let token = issue_token(&alice(), &jwt).unwrap();
        let claims = decode_token(&token, &jwt).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.role, "Teacher");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let token = issue_token(&alice(), &settings("0123456789abcdef0123456789abcdef")).unwrap();
        let result = decode_token(&token, &settings("fedcba9876543210fedcba9876543210"));
        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_token_with_wrong_audience_is_rejected() {
        let secret = "0123456789abcdef0123456789abcdef";
        let token = issue_token(&alice(), &settings(secret)).unwrap();
        let other = JwtSettings::new(secret, "GradeEntrySystem", "SomeOtherClient", 60).unwrap();
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_token_with_wrong_issuer_is_rejected() {
        let secret = "0123456789abcdef0123456789abcdef";
        let token = issue_token(&alice(), &settings(secret)).unwrap();
        let other = JwtSettings::new(secret, "SomeoneElse", "GradeEntrySystemClient", 60).unwrap();
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = settings("0123456789abcdef0123456789abcdef");
        let past = Utc::now() - Duration::minutes(5);
        let claims = Claims {
            sub: 7,
            name: "alice".into(),
            email: "alice@x.com".into(),
            role: "Teacher".into(),
            iss: jwt.issuer.clone(),
            aud: jwt.audience.clone(),
            exp: past.timestamp(),
            iat: (past - Duration::minutes(60)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret_bytes()),
        )
        .unwrap();

        assert!(decode_token(&token, &jwt).is_err());
    }
}
