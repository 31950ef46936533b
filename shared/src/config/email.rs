//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Which transport delivers verification emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write messages to the log (development)
    Log,
    /// POST messages to an HTTP email gateway
    Http,
}

/// Email sender identity and transport settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Transport used to deliver messages
    #[serde(default = "default_provider")]
    pub provider: EmailProvider,

    /// Display name of the sender
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Sender address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Gateway endpoint, required for the `http` provider
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer credential sent to the gateway
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            from_name: default_from_name(),
            from_email: default_from_email(),
            endpoint: None,
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_provider() -> EmailProvider {
    EmailProvider::Log
}

fn default_from_name() -> String {
    String::from("AuthKit")
}

fn default_from_email() -> String {
    String::from("no-reply@authkit.local")
}

fn default_timeout_seconds() -> u64 {
    10
}
