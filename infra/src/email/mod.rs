//! Email delivery module
//!
//! Concrete [`EmailSender`] transports for verification emails:
//! - **Log**: writes messages to the tracing output, for development
//! - **Http**: POSTs messages as JSON to an HTTP email gateway
//!
//! Recipients are masked in every log line.

use async_trait::async_trait;

use ak_core::services::{EmailMessage, EmailSender};
use ak_shared::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

pub mod http_sender;
pub mod log_sender;

pub use http_sender::HttpEmailSender;
pub use log_sender::LoggingEmailSender;


/// Transport selected from configuration
pub enum EmailTransport {
    Log(LoggingEmailSender),
    Http(HttpEmailSender),
}

impl EmailTransport {
    /// Provider name, for startup logs
    pub fn provider(&self) -> &'static str {
        match self {
            EmailTransport::Log(_) => "log",
            EmailTransport::Http(_) => "http",
        }
    }
}

#[async_trait]
impl EmailSender for EmailTransport {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        match self {
            EmailTransport::Log(sender) => sender.send_email(message).await,
            EmailTransport::Http(sender) => sender.send_email(message).await,
        }
    }
}

/// Create an email transport based on configuration
///
/// A misconfigured `http` provider is an error; there is no fallback to `log`.
pub fn create_email_sender(config: &EmailConfig) -> Result<EmailTransport, InfrastructureError> {
    let transport = match config.provider {
        EmailProvider::Log => EmailTransport::Log(LoggingEmailSender::new()),
        EmailProvider::Http => EmailTransport::Http(HttpEmailSender::from_config(config)?),
    };

    tracing::info!(provider = transport.provider(), "Email transport initialized");
    Ok(transport)
}
