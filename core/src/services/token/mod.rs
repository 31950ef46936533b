//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Signing access and refresh tokens
//! - Parsing and validating presented tokens
//! - Persisting, rotating and revoking refresh token records

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
