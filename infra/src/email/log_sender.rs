//! Email sender that writes messages to the log

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use ak_core::services::{EmailMessage, EmailSender};
use ak_shared::validation::mask_email;

/// Development transport. Message bodies are only emitted at debug level.
#[derive(Debug, Default)]
pub struct LoggingEmailSender {
    sent: AtomicU64,
}

impl LoggingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages written so far
    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        let sequence = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("log-{}", sequence);

        tracing::info!(
            recipient = %mask_email(&message.recipient),
            subject = %message.subject,
            message_id = %message_id,
            event = "email_logged",
            "Email written to log transport"
        );
        tracing::debug!(message_id = %message_id, body = %message.body, "Email body");

        Ok(message_id)
    }
}
