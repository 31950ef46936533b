//! Verification attempt throttling configuration

use serde::{Deserialize, Serialize};

/// Limits applied to failed verification-code attempts per account
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Failed attempts allowed before the account is throttled
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Cooldown measured from the most recent failed attempt, in minutes
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_cooldown_minutes() -> i64 {
    15
}
