//! Shared error response structure and status tags

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable status tag
    pub status: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, retry hints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Status tags exposed to clients. The tag is the contract; messages are cosmetic.
pub mod status_tags {
    // Request shape
    pub const INVALID_REQUEST_BODY: &str = "INVALID_REQUEST_BODY";
    pub const INVALID_PARAMETERS: &str = "INVALID_PARAMETERS";
    pub const INVALID_EMAIL_FORMAT: &str = "INVALID_EMAIL_FORMAT";
    pub const INVALID_CODE_FORMAT: &str = "INVALID_CODE_FORMAT";
    pub const INVALID_PASSWORD: &str = "INVALID_PASSWORD";

    // Registration and login
    pub const REGISTRATION_SUCCESSFUL: &str = "REGISTRATION_SUCCESSFUL";
    pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
    pub const USER_CREATION_FAILED: &str = "USER_CREATION_FAILED";
    pub const EMAIL_SEND_FAILED: &str = "EMAIL_SEND_FAILED";
    pub const EMAIL_VERIFICATION_REQUIRED: &str = "EMAIL_VERIFICATION_REQUIRED";
    pub const PASSWORD_SET_REQUIRED: &str = "PASSWORD_SET_REQUIRED";
    pub const PASSWORD_ENTRY_REQUIRED: &str = "PASSWORD_ENTRY_REQUIRED";
    pub const PASSWORD_SET: &str = "PASSWORD_SET";
    pub const PASSWORD_ALREADY_SET: &str = "PASSWORD_ALREADY_SET";
    pub const LOGIN_SUCCESSFUL: &str = "LOGIN_SUCCESSFUL";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const LOGGED_OUT: &str = "LOGGED_OUT";

    // Verification
    pub const VERIFICATION_SUCCESSFUL: &str = "VERIFICATION_SUCCESSFUL";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const EMAIL_ALREADY_VERIFIED: &str = "EMAIL_ALREADY_VERIFIED";
    pub const EMAIL_ALREADY_VERIFIED_PASSWORD_SET: &str = "EMAIL_ALREADY_VERIFIED_PASSWORD_SET";
    pub const TOO_MANY_ATTEMPTS: &str = "TOO_MANY_ATTEMPTS";
    pub const INVALID_CODE: &str = "INVALID_CODE";
    pub const TOKEN_ISSUANCE_FAILED: &str = "TOKEN_ISSUANCE_FAILED";
    pub const TOKEN_PERSISTENCE_FAILED: &str = "TOKEN_PERSISTENCE_FAILED";

    // Tokens
    pub const TOKEN_REFRESHED: &str = "TOKEN_REFRESHED";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const INVALID_TOKEN_TYPE: &str = "INVALID_TOKEN_TYPE";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const SUBJECT_MISSING: &str = "SUBJECT_MISSING";
    pub const SIGNING_ERROR: &str = "SIGNING_ERROR";
    pub const REFRESH_TOKEN_NOT_FOUND: &str = "REFRESH_TOKEN_NOT_FOUND";
    pub const REFRESH_TOKEN_INACTIVE: &str = "REFRESH_TOKEN_INACTIVE";
    pub const REFRESH_UPDATE_FAILED: &str = "REFRESH_UPDATE_FAILED";

    // Middleware
    pub const AUTHORIZATION_REQUIRED: &str = "AUTHORIZATION_REQUIRED";
    pub const INVALID_TOKEN_FORMAT: &str = "INVALID_TOKEN_FORMAT";

    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization_skips_empty_details() {
        let response = ErrorResponse::new(status_tags::INVALID_CODE, "Invalid verification code");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "INVALID_CODE");
        assert_eq!(json["message"], "Invalid verification code");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(status_tags::TOO_MANY_ATTEMPTS, "Slow down")
            .add_detail("retry_after_seconds", 600);
        let details = response.details.unwrap();
        assert_eq!(details["retry_after_seconds"], serde_json::json!(600));
    }
}
