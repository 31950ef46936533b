//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use ak_api::AppState;
use ak_core::services::{
    AuthService, AuthServiceConfig, ManualClock, MockEmailSender, TokenServiceConfig,
};
use ak_core::{MockTokenRepository, MockUserRepository};
use ak_shared::{PasswordConfig, ThrottleConfig};
use chrono::Utc;
use serde_json::Value;

pub type TestState = AppState<MockUserRepository, MockTokenRepository, MockEmailSender>;

pub const EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "correct horse battery";

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
    pub email: Arc<MockEmailSender>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let tokens = Arc::new(MockTokenRepository::new());
        let email = Arc::new(MockEmailSender::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let config = AuthServiceConfig {
            token: TokenServiceConfig {
                jwt_secret: "api-test-secret".to_string(),
                access_token_expiry_hours: 1,
                refresh_token_expiry_days: 7,
            },
            throttle: ThrottleConfig {
                max_attempts: 5,
                cooldown_minutes: 15,
            },
            password: PasswordConfig {
                hash_cost: 4,
                ..Default::default()
            },
            ..Default::default()
        };

        let auth_service = Arc::new(AuthService::with_clock(
            users.clone(),
            tokens.clone(),
            email.clone(),
            config,
            clock.clone(),
        ));

        Self {
            state: web::Data::new(AppState::new(auth_service)),
            users,
            tokens,
            email,
            clock,
        }
    }

    /// Code most recently emailed to `recipient`
    pub fn code_for(&self, recipient: &str) -> String {
        self.email
            .last_code_for(recipient)
            .expect("no verification email was sent")
    }

    /// A 4-digit code that differs from the one most recently sent
    pub fn wrong_code_for(&self, recipient: &str) -> String {
        if self.code_for(recipient) == "0000" {
            "1111".to_string()
        } else {
            "0000".to_string()
        }
    }
}

pub fn status_of(body: &Value) -> &str {
    body["status"].as_str().unwrap_or_default()
}
