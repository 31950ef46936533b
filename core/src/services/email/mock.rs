//! In-memory email sender for tests and local runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{EmailMessage, EmailSender};

/// Mock email sender that records every delivered message
#[derive(Default)]
pub struct MockEmailSender {
    sent_messages: Arc<Mutex<Vec<EmailMessage>>>,
    should_fail: AtomicBool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent_messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// The code carried by the most recent message to `recipient`
    pub fn last_code_for(&self, recipient: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|m| m.recipient == recipient)
            .and_then(|m| m.body.lines().next().map(str::to_string))
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Email service error".to_string());
        }

        let mut sent = self.sent_messages.lock().unwrap_or_else(|e| e.into_inner());
        sent.push(message.clone());
        Ok(format!("mock-msg-{}", sent.len()))
    }
}
