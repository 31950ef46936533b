//! Domain-specific error types for verification, token and credential operations
//!
//! Every variant maps to a stable status tag through `status()`. The tag is what
//! clients program against; the `Display` text is for logs.

use ak_shared::status_tags;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Email already verified")]
    AlreadyVerified { password_set: bool },

    #[error("Too many verification attempts, retry in {retry_after_seconds}s")]
    TooManyAttempts { retry_after_seconds: i64 },

    #[error("Invalid verification code")]
    InvalidCode { remaining_attempts: u32 },

    #[error("Email verification required")]
    EmailVerificationRequired,

    #[error("Password must be set before password login")]
    PasswordSetRequired,

    #[error("Password already set")]
    PasswordAlreadySet,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User creation failed")]
    UserCreationFailed,

    #[error("Verification email could not be delivered")]
    EmailDeliveryFailed,

    #[error("Token issuance failed")]
    TokenIssuanceFailed,

    #[error("Refresh token persistence failed")]
    TokenPersistenceFailed,
}

impl AuthError {
    /// Stable status tag for this error
    pub fn status(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => status_tags::USER_NOT_FOUND,
            AuthError::UserAlreadyExists => status_tags::USER_ALREADY_EXISTS,
            AuthError::AlreadyVerified { password_set: false } => {
                status_tags::EMAIL_ALREADY_VERIFIED
            }
            AuthError::AlreadyVerified { password_set: true } => {
                status_tags::EMAIL_ALREADY_VERIFIED_PASSWORD_SET
            }
            AuthError::TooManyAttempts { .. } => status_tags::TOO_MANY_ATTEMPTS,
            AuthError::InvalidCode { .. } => status_tags::INVALID_CODE,
            AuthError::EmailVerificationRequired => status_tags::EMAIL_VERIFICATION_REQUIRED,
            AuthError::PasswordSetRequired => status_tags::PASSWORD_SET_REQUIRED,
            AuthError::PasswordAlreadySet => status_tags::PASSWORD_ALREADY_SET,
            AuthError::InvalidCredentials => status_tags::INVALID_CREDENTIALS,
            AuthError::UserCreationFailed => status_tags::USER_CREATION_FAILED,
            AuthError::EmailDeliveryFailed => status_tags::EMAIL_SEND_FAILED,
            AuthError::TokenIssuanceFailed => status_tags::TOKEN_ISSUANCE_FAILED,
            AuthError::TokenPersistenceFailed => status_tags::TOKEN_PERSISTENCE_FAILED,
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid token type")]
    InvalidTokenType,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token subject missing")]
    SubjectMissing,

    #[error("Token signing failed")]
    SigningError,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token is not active")]
    RefreshTokenInactive,

    #[error("Refresh token update failed")]
    RefreshUpdateFailed,
}

impl TokenError {
    /// Stable status tag for this error
    pub fn status(&self) -> &'static str {
        match self {
            TokenError::InvalidToken => status_tags::INVALID_TOKEN,
            TokenError::InvalidTokenType => status_tags::INVALID_TOKEN_TYPE,
            TokenError::TokenExpired => status_tags::TOKEN_EXPIRED,
            TokenError::SubjectMissing => status_tags::SUBJECT_MISSING,
            TokenError::SigningError => status_tags::SIGNING_ERROR,
            TokenError::RefreshTokenNotFound => status_tags::REFRESH_TOKEN_NOT_FOUND,
            TokenError::RefreshTokenInactive => status_tags::REFRESH_TOKEN_INACTIVE,
            TokenError::RefreshUpdateFailed => status_tags::REFRESH_UPDATE_FAILED,
        }
    }
}

/// Input validation errors, raised before any state is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Verification code must be exactly 4 digits")]
    InvalidCodeFormat,

    #[error("Password length must be between {min_bytes} and {max_bytes} bytes")]
    InvalidPassword { min_bytes: usize, max_bytes: usize },
}

impl ValidationError {
    /// Stable status tag for this error
    pub fn status(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => status_tags::INVALID_EMAIL_FORMAT,
            ValidationError::InvalidCodeFormat => status_tags::INVALID_CODE_FORMAT,
            ValidationError::InvalidPassword { .. } => status_tags::INVALID_PASSWORD,
        }
    }
}
