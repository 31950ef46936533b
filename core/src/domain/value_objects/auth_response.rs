//! Authentication outcome value objects returned to the transport layer.

use ak_shared::status_tags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token pair issued after a successful verification, refresh or password login
///
/// `expires_in` is the absolute expiry of the access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthTokens {
    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Access token expiry
    pub expires_in: DateTime<Utc>,
}

impl AuthTokens {
    pub fn new(access_token: String, refresh_token: String, expires_in: DateTime<Utc>) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

/// A newly created account awaiting verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub user_id: Uuid,
    pub email: String,
}

/// Result of the login-or-register entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No account existed; one was created and a code sent
    Registered(Registration),
    /// Account exists but is unverified; a fresh code was sent
    VerificationRequired,
    /// Verified account without a password
    PasswordSetRequired,
    /// Verified account with a password; the client should prompt for it
    PasswordEntryRequired,
}

impl LoginOutcome {
    /// Stable status tag for this outcome
    pub fn status(&self) -> &'static str {
        match self {
            LoginOutcome::Registered(_) => status_tags::REGISTRATION_SUCCESSFUL,
            LoginOutcome::VerificationRequired => status_tags::EMAIL_VERIFICATION_REQUIRED,
            LoginOutcome::PasswordSetRequired => status_tags::PASSWORD_SET_REQUIRED,
            LoginOutcome::PasswordEntryRequired => status_tags::PASSWORD_ENTRY_REQUIRED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_tokens_serialize_expiry_as_timestamp() {
        let expires = DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let tokens = AuthTokens::new("a".into(), "r".into(), expires);
        let json = serde_json::to_value(&tokens).unwrap();

        assert_eq!(json["access_token"], "a");
        assert_eq!(json["refresh_token"], "r");
        assert_eq!(json["expires_in"], "2030-01-01T00:00:00Z");
    }

    #[test]
    fn test_login_outcome_status() {
        let registered = LoginOutcome::Registered(Registration {
            user_id: Uuid::new_v4(),
            email: "user@example.com".into(),
        });
        assert_eq!(registered.status(), "REGISTRATION_SUCCESSFUL");
        assert_eq!(
            LoginOutcome::PasswordEntryRequired.status(),
            "PASSWORD_ENTRY_REQUIRED"
        );
    }
}
