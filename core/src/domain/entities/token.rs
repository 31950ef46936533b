//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of token carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    /// Claim value for this token type
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
///
/// `sub` and `type` default to empty strings when absent so that a missing
/// claim surfaces as a typed validation failure rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,

    /// Token type, `access` or `refresh`
    #[serde(rename = "type", default)]
    pub token_type: String,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// JWT ID, keeps tokens minted in the same second distinct
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Creates claims for `subject` of the given type
    pub fn new(
        subject: &str,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            token_type: token_type.as_str().to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// A signed token together with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// Expiry embedded in the `exp` claim
    pub expires_at: DateTime<Utc>,
}

/// Persisted refresh token record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Owning user account
    pub user_id: Uuid,

    /// Optional device association
    pub device_info_id: Option<Uuid>,

    /// The signed refresh token string, unique across records
    pub token: String,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Only active records can be exchanged
    pub is_active: bool,
}

impl RefreshTokenRecord {
    /// Creates a new active record
    pub fn new(
        user_id: Uuid,
        token: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            device_info_id: None,
            token,
            created_at,
            expires_at,
            is_active: true,
        }
    }

    /// Attach a device association
    pub fn with_device(mut self, device_info_id: Option<Uuid>) -> Self {
        self.device_info_id = device_info_id;
        self
    }

    /// Checks if the record has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
