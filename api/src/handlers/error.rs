//! Maps domain errors onto HTTP responses
//!
//! The status tag decides the HTTP code. Clients only ever see the tag, a
//! generic message and structured details; internal error text stays in logs.

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use ak_core::errors::{AuthError, DomainError, ValidationError};
use ak_shared::{status_tags, ErrorResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

const FIELD_TAGS: [(&str, &str); 3] = [
    ("email", status_tags::INVALID_EMAIL_FORMAT),
    ("code", status_tags::INVALID_CODE_FORMAT),
    ("password", status_tags::INVALID_PASSWORD),
];

/// Error returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
#[error("{tag}: {message}")]
pub struct ApiError {
    status: StatusCode,
    tag: &'static str,
    message: &'static str,
    details: HashMap<String, serde_json::Value>,
}

impl ApiError {
    /// Build an error for `tag` with its default HTTP code
    pub fn new(tag: &'static str) -> Self {
        Self {
            status: status_for(tag),
            tag,
            message: message_for(tag),
            details: HashMap::new(),
        }
    }

    /// Override the HTTP code for endpoints that report a tag differently
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Map request-body validation failures to a single tag
    ///
    /// Fields are reported in the order the service checks them: email, then
    /// code, then password.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|field| -> &str { field }).collect();
        fields.sort_unstable();

        let tag = FIELD_TAGS
            .iter()
            .find(|(field, _)| fields.contains(field))
            .map(|(_, tag)| *tag)
            .unwrap_or(status_tags::INVALID_PARAMETERS);

        tracing::debug!(fields = ?fields, status = tag, "Request validation failed");
        ApiError::new(tag).with_detail("fields", fields)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let api_error = ApiError::new(error.status());

        if api_error.status.is_server_error() {
            tracing::error!(status = api_error.tag, error = %error, "Request failed");
        } else {
            tracing::debug!(status = api_error.tag, error = %error, "Request rejected");
        }

        match error {
            DomainError::Auth(AuthError::TooManyAttempts {
                retry_after_seconds,
            }) => api_error.with_detail("retry_after_seconds", retry_after_seconds),
            DomainError::Auth(AuthError::InvalidCode { remaining_attempts }) => {
                api_error.with_detail("remaining_attempts", remaining_attempts)
            }
            DomainError::ValidationErr(ValidationError::InvalidPassword {
                min_bytes,
                max_bytes,
            }) => api_error
                .with_detail("min_bytes", min_bytes)
                .with_detail("max_bytes", max_bytes),
            _ => api_error,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ErrorResponse::new(self.tag, self.message);
        if !self.details.is_empty() {
            body.details = Some(self.details.clone());
        }

        HttpResponse::build(self.status).json(body)
    }
}

/// `JsonConfig` error handler: malformed or missing bodies become `INVALID_REQUEST_BODY`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    ApiError::new(status_tags::INVALID_REQUEST_BODY).into()
}

/// HTTP code for a status tag
pub fn status_for(tag: &str) -> StatusCode {
    use status_tags::*;

    match tag {
        INVALID_REQUEST_BODY | INVALID_PARAMETERS | INVALID_EMAIL_FORMAT | INVALID_CODE_FORMAT
        | INVALID_PASSWORD => StatusCode::BAD_REQUEST,

        INVALID_CODE
        | EMAIL_VERIFICATION_REQUIRED
        | PASSWORD_SET_REQUIRED
        | PASSWORD_ENTRY_REQUIRED
        | INVALID_CREDENTIALS
        | INVALID_TOKEN
        | INVALID_TOKEN_TYPE
        | TOKEN_EXPIRED
        | SUBJECT_MISSING
        | REFRESH_TOKEN_NOT_FOUND
        | REFRESH_TOKEN_INACTIVE
        | AUTHORIZATION_REQUIRED
        | INVALID_TOKEN_FORMAT => StatusCode::UNAUTHORIZED,

        USER_NOT_FOUND | NOT_FOUND => StatusCode::NOT_FOUND,
        USER_ALREADY_EXISTS | PASSWORD_ALREADY_SET => StatusCode::CONFLICT,
        EMAIL_ALREADY_VERIFIED | EMAIL_ALREADY_VERIFIED_PASSWORD_SET => {
            StatusCode::ALREADY_REPORTED
        }
        TOO_MANY_ATTEMPTS => StatusCode::TOO_MANY_REQUESTS,

        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing message for a status tag
pub fn message_for(tag: &str) -> &'static str {
    use status_tags::*;

    match tag {
        INVALID_REQUEST_BODY => "Request body is missing or malformed",
        INVALID_PARAMETERS => "Invalid request parameters",
        INVALID_EMAIL_FORMAT => "Invalid email format",
        INVALID_CODE_FORMAT => "Verification code must be exactly 4 digits",
        INVALID_PASSWORD => "Password does not meet the length requirements",
        USER_ALREADY_EXISTS => "An account with this email already exists",
        USER_CREATION_FAILED => "Account could not be created",
        EMAIL_SEND_FAILED => "Verification email could not be sent",
        EMAIL_VERIFICATION_REQUIRED => "Email verification required",
        PASSWORD_SET_REQUIRED => "Password must be set",
        PASSWORD_ENTRY_REQUIRED => "Password required",
        PASSWORD_ALREADY_SET => "Password has already been set",
        INVALID_CREDENTIALS => "Invalid email or password",
        USER_NOT_FOUND => "User not found",
        EMAIL_ALREADY_VERIFIED => "Email already verified",
        EMAIL_ALREADY_VERIFIED_PASSWORD_SET => "Email already verified and password set",
        TOO_MANY_ATTEMPTS => "Too many verification attempts, try again later",
        INVALID_CODE => "Invalid verification code",
        TOKEN_ISSUANCE_FAILED => "Tokens could not be issued",
        TOKEN_PERSISTENCE_FAILED => "Tokens could not be stored",
        INVALID_TOKEN => "Invalid token",
        INVALID_TOKEN_TYPE => "Invalid token type",
        TOKEN_EXPIRED => "Token expired",
        SUBJECT_MISSING => "Token subject missing",
        REFRESH_TOKEN_NOT_FOUND => "Refresh token not found",
        REFRESH_TOKEN_INACTIVE => "Refresh token is no longer active",
        REFRESH_UPDATE_FAILED => "Refresh token could not be updated",
        AUTHORIZATION_REQUIRED => "Authorization header required",
        INVALID_TOKEN_FORMAT => "Authorization header must be 'Bearer <token>'",
        NOT_FOUND => "The requested resource was not found",
        _ => "An internal error occurred",
    }
}
