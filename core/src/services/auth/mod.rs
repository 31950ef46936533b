//! Authentication service module
//!
//! This module provides the complete email authentication flow:
//! - Registration and login-or-register with emailed codes
//! - Code verification and token issuance
//! - Token refresh and logout
//! - Password credential setup and password login

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, validate_password, verify_password};
pub use service::AuthService;
