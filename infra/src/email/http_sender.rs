//! Email sender for JSON HTTP gateways
//!
//! The message is POSTed as JSON with a bearer credential. A JSON response
//! carrying `id` or `message_id` supplies the returned message id.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use ak_core::services::{EmailMessage, EmailSender};
use ak_shared::validation::mask_email;
use ak_shared::EmailConfig;

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(alias = "message_id")]
    id: Option<String>,
}

/// HTTP gateway email transport
#[derive(Debug, Clone)]
pub struct HttpEmailSender {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEmailSender {
    /// Create a sender posting to `endpoint`
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Email gateway endpoint must not be empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Build from the `email` configuration section
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            InfrastructureError::Config("email.endpoint is required for the http provider".to_string())
        })?;

        Self::new(
            endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let mut request = self.client.post(&self.endpoint).json(message);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::Email(format!(
                "Gateway responded with status {}",
                status
            )));
        }

        // Gateways that answer without a JSON body still count as delivered
        let body = response.text().await?;
        let message_id = serde_json::from_str::<GatewayResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.id)
            .unwrap_or_else(|| format!("http-{}", uuid::Uuid::new_v4()));

        Ok(message_id)
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        match self.post(message).await {
            Ok(message_id) => {
                tracing::info!(
                    recipient = %mask_email(&message.recipient),
                    message_id = %message_id,
                    event = "email_sent",
                    "Verification email delivered"
                );
                Ok(message_id)
            }
            Err(e) => {
                tracing::error!(
                    recipient = %mask_email(&message.recipient),
                    error = %e,
                    event = "email_send_failed",
                    "Email gateway request failed"
                );
                Err(e.to_string())
            }
        }
    }
}
