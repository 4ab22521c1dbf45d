//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in minutes
pub const DEFAULT_JWT_EXPIRATION_MINUTES: i64 = 60;

/// Default token issuer (`iss` claim)
pub const DEFAULT_JWT_ISSUER: &str = "GradeEntrySystem";

/// Default token audience (`aud` claim)
pub const DEFAULT_JWT_AUDIENCE: &str = "GradeEntrySystemClient";

/// Minimum JWT secret length in bytes (HMAC-SHA256 key size)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Signing key used only when running a debug build without JWT_SECRET
pub const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// User Roles
// =============================================================================

/// Role stamped on users who register without naming one
pub const ROLE_TEACHER: &str = "Teacher";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Origins allowed by CORS in production when CORS_ALLOWED_ORIGINS is unset
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &[&str] =
    &["https://localhost:60947", "http://localhost:5173"];

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://grade_entry.db?mode=rwc";

// =============================================================================
// Seed data
// =============================================================================

/// Username of the demo teacher account created by `seed`
pub const SEED_TEACHER_USERNAME: &str = "teacher";

/// Email of the demo teacher account
pub const SEED_TEACHER_EMAIL: &str = "teacher@gradeentry.com";

/// Password of the demo teacher account
pub const SEED_TEACHER_PASSWORD: &str = "teacher123";
