//! # Infrastructure Layer
//!
//! Concrete adapters for the ports defined in `ak_core`:
//! - **Database**: MySQL repositories for user accounts and refresh tokens using SQLx
//! - **Email**: verification email transports (log output or HTTP gateway)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery module - outbound transports
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email service error: {0}")]
    Email(String),
}
