//! Verification module for email one-time codes
//!
//! This module provides the code verification workflow:
//! - 4-digit code generation and timing-safe comparison
//! - Failed-attempt throttling with a cooldown window
//! - The verification state machine that issues tokens on success

mod code;
mod service;
mod throttle;


pub use code::{codes_match, generate_code};
pub use service::VerificationService;
pub use throttle::AttemptThrottle;
