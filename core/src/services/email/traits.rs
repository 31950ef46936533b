//! Email sender trait

use async_trait::async_trait;
use serde::Serialize;

/// A fully composed outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub from_name: String,
    pub from_email: String,
    pub body: String,
}

/// Trait for email transport integration
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message, returning the transport's message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String>;
}
