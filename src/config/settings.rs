//! Application settings loaded from environment variables.

use chrono::{Duration, Utc};
use std::env;
use std::fmt;

use super::constants::{
    DEFAULT_CORS_ALLOWED_ORIGINS, DEFAULT_DATABASE_URL, DEFAULT_JWT_AUDIENCE,
    DEFAULT_JWT_EXPIRATION_MINUTES, DEFAULT_JWT_ISSUER, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Deployment environment, selects CORS policy and secret strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Token signing settings.
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl JwtSettings {
    /// Build settings, rejecting secrets shorter than the HMAC key size.
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        expiration_minutes: i64,
    ) -> AppResult<Self> {
        let secret = secret.into();
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if expiration_minutes <= 0 {
            return Err(AppError::internal("JWT_EXPIRATION_MINUTES must be positive"));
        }
        if token_expiry(expiration_minutes).is_none() {
            return Err(AppError::internal("JWT_EXPIRATION_MINUTES is out of range"));
        }

        Ok(Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
            expiration_minutes,
        })
    }

    /// Expiry instant for a token issued now, `None` on overflow.
    pub fn expires_at(&self) -> Option<chrono::DateTime<Utc>> {
        token_expiry(self.expiration_minutes)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

fn token_expiry(minutes: i64) -> Option<chrono::DateTime<Utc>> {
    Duration::try_minutes(minutes).and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub jwt: JwtSettings,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("database_url", &"[REDACTED]")
            .field("jwt", &self.jwt)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// In development a missing JWT_SECRET falls back to an insecure default
    /// with a warning; in production it is an error.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let environment = env::var("APP_ENV")
            .map(|v| Environment::from_env_value(&v))
            .unwrap_or(Environment::Development);

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if environment.is_development() => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let jwt = JwtSettings::new(
            secret,
            env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_JWT_ISSUER.to_string()),
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_JWT_AUDIENCE.to_string()),
            env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_MINUTES),
        )?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| {
                DEFAULT_CORS_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| o.to_string())
                    .collect()
            });

        Ok(Self {
            environment,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_allowed_origins,
        })
    }

    /// Configuration with defaults and the given signing settings.
    pub fn with_jwt(jwt: JwtSettings) -> Self {
        Self {
            environment: Environment::Development,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_allowed_origins: DEFAULT_CORS_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtSettings::new("short", "iss", "aud", 60);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let result = JwtSettings::new(DEV_JWT_SECRET, "iss", "aud", 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_expiry_rejected() {
        assert!(JwtSettings::new(DEV_JWT_SECRET, "iss", "aud", i64::MAX).is_err());
        assert!(JwtSettings::new(DEV_JWT_SECRET, "iss", "aud", 1_000_000_000_000).is_err());
    }

    #[test]
    fn test_expiry_follows_lifetime() {
        let jwt = JwtSettings::new(DEV_JWT_SECRET, "iss", "aud", 90).unwrap();
        let lifetime = jwt.expires_at().unwrap() - Utc::now();
        assert!(lifetime > Duration::minutes(89) && lifetime <= Duration::minutes(90));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let jwt = JwtSettings::new(DEV_JWT_SECRET, "iss", "aud", 60).unwrap();
        let rendered = format!("{:?}", Config::with_jwt(jwt));
        assert!(!rendered.contains(DEV_JWT_SECRET));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins(" http://a.test , ,https://b.test");
        assert_eq!(origins, vec!["http://a.test", "https://b.test"]);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_env_value("Production"), Environment::Production);
        assert_eq!(Environment::from_env_value("dev"), Environment::Development);
    }
}
