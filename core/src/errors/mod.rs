//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{AuthError, TokenError, ValidationError};

use ak_shared::status_tags;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Store or other dependency failure. The message is for logs only.
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Stable status tag for this error
    pub fn status(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => status_tags::NOT_FOUND,
            DomainError::Internal { .. } => status_tags::INTERNAL_ERROR,
            DomainError::Auth(e) => e.status(),
            DomainError::Token(e) => e.status(),
            DomainError::ValidationErr(e) => e.status(),
        }
    }

    /// Shorthand for a store/dependency failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
