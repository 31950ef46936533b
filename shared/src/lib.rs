//! Shared utilities and common types for AuthKit
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error response structure and status tags
//! - Email and verification code validation

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment, JwtConfig,
    LogFormat, LoggingConfig, PasswordConfig, ServerConfig, ThrottleConfig,
};
pub use errors::{status_tags, ErrorResponse};
pub use utils::validation;
