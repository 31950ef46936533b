//! User account entity keyed by normalized email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an account stands in the verification lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    /// Code issued, not yet confirmed
    Unverified,
    /// Unverified with the failed-attempt limit reached inside the cooldown window
    Throttled,
    /// Email confirmed, no password credential yet
    VerifiedNoPassword,
    /// Email confirmed and password credential set
    VerifiedWithPassword,
}

/// User account entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier for the user, immutable after creation
    pub id: Uuid,

    /// Lowercase-normalized email address
    pub email: String,

    /// Current one-time verification code
    pub code: String,

    /// Whether the email address has been confirmed. Never reverts to false.
    pub email_verified: bool,

    /// bcrypt hash of the password credential
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Failed verification attempts since the last reset
    pub attempt_count: u32,

    /// Time of the most recent failed attempt, `None` when never attempted or reset
    pub last_attempt_time: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a new unverified account holding a freshly issued code
    pub fn new(email: String, code: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            code,
            email_verified: false,
            password_hash: None,
            attempt_count: 0,
            last_attempt_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a password credential has been set
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Derive the lifecycle state; `throttled` comes from the attempt throttle
    pub fn state(&self, throttled: bool) -> VerificationState {
        match (self.email_verified, self.has_password()) {
            (true, true) => VerificationState::VerifiedWithPassword,
            (true, false) => VerificationState::VerifiedNoPassword,
            (false, _) if throttled => VerificationState::Throttled,
            (false, _) => VerificationState::Unverified,
        }
    }
}
