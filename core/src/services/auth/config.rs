//! Configuration for the authentication service

use ak_shared::{AppConfig, PasswordConfig, ThrottleConfig};

use crate::services::email::VerificationEmailTemplate;
use crate::services::token::TokenServiceConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Token signing and expiry
    pub token: TokenServiceConfig,
    /// Failed verification attempt limits
    pub throttle: ThrottleConfig,
    /// Verification email sender identity
    pub email: VerificationEmailTemplate,
    /// Password length bounds and hash cost
    pub password: PasswordConfig,
}

impl From<&AppConfig> for AuthServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            token: TokenServiceConfig::from(&config.auth.jwt),
            throttle: config.throttle.clone(),
            email: VerificationEmailTemplate::from(&config.email),
            password: config.auth.password.clone(),
        }
    }
}
