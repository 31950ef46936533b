//! Verification email composition

use ak_shared::EmailConfig;

use super::traits::EmailMessage;

/// Sender identity and wording for verification code emails
#[derive(Debug, Clone)]
pub struct VerificationEmailTemplate {
    pub from_name: String,
    pub from_email: String,
}

impl VerificationEmailTemplate {
    pub fn new(from_name: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self {
            from_name: from_name.into(),
            from_email: from_email.into(),
        }
    }

    /// Compose the message carrying `code` for `recipient`
    pub fn render(&self, recipient: &str, code: &str) -> EmailMessage {
        EmailMessage {
            recipient: recipient.to_string(),
            subject: format!("Your verification code is: {}", code),
            from_name: self.from_name.clone(),
            from_email: self.from_email.clone(),
            body: format!("{}\nPlease use this code to complete your registration.", code),
        }
    }
}

impl Default for VerificationEmailTemplate {
    fn default() -> Self {
        Self::from(&EmailConfig::default())
    }
}

impl From<&EmailConfig> for VerificationEmailTemplate {
    fn from(config: &EmailConfig) -> Self {
        Self::new(config.from_name.clone(), config.from_email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_verification_email() {
        let template = VerificationEmailTemplate::new("AuthKit", "no-reply@authkit.local");
        let message = template.render("user@example.com", "0427");

        assert_eq!(message.recipient, "user@example.com");
        assert_eq!(message.subject, "Your verification code is: 0427");
        assert_eq!(
            message.body,
            "0427\nPlease use this code to complete your registration."
        );
        assert_eq!(message.from_name, "AuthKit");
        assert_eq!(message.from_email, "no-reply@authkit.local");
    }
}
