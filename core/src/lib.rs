//! # AuthKit Core
//!
//! Core business logic and domain layer for the AuthKit backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthTokens, Claims, IssuedToken, LoginOutcome, RefreshTokenRecord, Registration, TokenType,
    UserAccount, VerificationState,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{MockTokenRepository, MockUserRepository, TokenRepository, UserRepository};
pub use services::{
    AttemptThrottle, AuthService, AuthServiceConfig, Clock, EmailMessage, EmailSender,
    ManualClock, MockEmailSender, SystemClock, TokenService, TokenServiceConfig,
    VerificationEmailTemplate, VerificationService,
};
