use ak_core::AuthTokens;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Body of `/register` and `/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    /// Email address; normalized and format-checked by the service
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// 4-digit verification code
    #[validate(length(equal = 4))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetPasswordRequest {
    /// Length bounds are enforced by the service configuration
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordLoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Success body shared by every auth endpoint
///
/// Error bodies use [`ak_shared::ErrorResponse`], which has the same shape
/// without the token fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Stable machine-readable status tag
    pub status: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Absolute expiry of the access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    pub fn new(status: &str, message: &str) -> Self {
        Self {
            status: status.to_string(),
            message: message.to_string(),
            access_token: None,
            refresh_token: None,
            expires_in: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Response carrying an issued token pair
    pub fn with_tokens(status: &str, message: &str, tokens: AuthTokens) -> Self {
        Self {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            expires_in: Some(tokens.expires_in),
            ..Self::new(status, message)
        }
    }

    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}
