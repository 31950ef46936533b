//! Authentication configuration: JWT signing and password hashing

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// bcrypt ignores input past this many bytes
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used to sign access and refresh tokens
    pub secret: String,

    /// Access token lifetime in hours
    #[serde(default = "default_access_expiry_hours")]
    pub access_token_expiry_hours: i64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_expiry_days")]
    pub refresh_token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry_hours: default_access_expiry_hours(),
            refresh_token_expiry_days: default_refresh_expiry_days(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in hours
    pub fn with_access_expiry_hours(mut self, hours: i64) -> Self {
        self.access_token_expiry_hours = hours;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Password credential policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,

    /// Minimum accepted password length in UTF-8 bytes
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Maximum accepted password length in UTF-8 bytes, at most
    /// [`BCRYPT_MAX_PASSWORD_BYTES`]
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            hash_cost: default_hash_cost(),
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Password policy
    #[serde(default)]
    pub password: PasswordConfig,
}

fn default_access_expiry_hours() -> i64 {
    1
}

fn default_refresh_expiry_days() -> i64 {
    7
}

fn default_hash_cost() -> u32 {
    12
}

fn default_min_length() -> usize {
    8
}

fn default_max_length() -> usize {
    BCRYPT_MAX_PASSWORD_BYTES
}
