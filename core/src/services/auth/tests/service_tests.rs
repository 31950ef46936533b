//! Unit tests for the authentication service

use std::sync::Arc;

use ak_shared::PasswordConfig;
use chrono::{Duration, Utc};

use crate::domain::entities::token::TokenType;
use crate::domain::value_objects::{AuthTokens, LoginOutcome};
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{MockTokenRepository, MockUserRepository, TokenRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::clock::{Clock, ManualClock};
use crate::services::email::MockEmailSender;
use crate::services::token::TokenServiceConfig;

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "s3cure-password";

type Service = AuthService<MockUserRepository, MockTokenRepository, MockEmailSender>;

struct Fixture {
    service: Service,
    users: Arc<MockUserRepository>,
    tokens: Arc<MockTokenRepository>,
    email: Arc<MockEmailSender>,
    clock: Arc<ManualClock>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());
    let email = Arc::new(MockEmailSender::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let config = AuthServiceConfig {
        token: TokenServiceConfig {
            jwt_secret: "auth-test-secret".to_string(),
            access_token_expiry_hours: 1,
            refresh_token_expiry_days: 7,
        },
        password: PasswordConfig {
            hash_cost: 4,
            ..PasswordConfig::default()
        },
        ..AuthServiceConfig::default()
    };

    let service = AuthService::with_clock(
        users.clone(),
        tokens.clone(),
        email.clone(),
        config,
        clock.clone(),
    );

    Fixture {
        service,
        users,
        tokens,
        email,
        clock,
    }
}

fn wrong_code(code: &str) -> String {
    if code == "0000" { "1111" } else { "0000" }.to_string()
}

async fn registered_and_verified(f: &Fixture) -> AuthTokens {
    f.service.register(EMAIL).await.unwrap();
    let code = f.email.last_code_for(EMAIL).unwrap();
    f.service.verify_code(EMAIL, &code).await.unwrap()
}

#[tokio::test]
async fn test_register_creates_account_and_sends_code() {
    let f = fixture();

    let registration = f.service.register(" User@Example.com ").await.unwrap();
    assert_eq!(registration.email, EMAIL);

    let account = f.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(account.id, registration.user_id);
    assert!(!account.email_verified);

    let messages = f.email.sent_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].recipient, EMAIL);
    assert_eq!(
        messages[0].subject,
        format!("Your verification code is: {}", account.code)
    );
    assert_eq!(f.email.last_code_for(EMAIL), Some(account.code));
}

#[tokio::test]
async fn test_register_twice_fails() {
    let f = fixture();
    f.service.register(EMAIL).await.unwrap();

    let result = f.service.register("USER@example.com").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert_eq!(f.users.count().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let f = fixture();

    let result = f.service.register("user@localhost").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
    assert_eq!(f.email.sent_count(), 0);
}

#[tokio::test]
async fn test_register_email_failure() {
    let f = fixture();
    f.email.set_should_fail(true);

    let result = f.service.register(EMAIL).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailDeliveryFailed))
    ));
}

#[tokio::test]
async fn test_full_registration_flow() {
    let f = fixture();

    let tokens = registered_and_verified(&f).await;

    let account = f.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(account.email_verified);
    assert_eq!(tokens.expires_in, f.clock.now() + Duration::hours(1));
    assert_eq!(f.tokens.active_count().await, 1);
}

#[tokio::test]
async fn test_login_unknown_email_registers() {
    let f = fixture();

    let outcome = f.service.login(EMAIL).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Registered(_)));
    assert_eq!(f.users.count().await, 1);
    assert_eq!(f.email.sent_count(), 1);
}

#[tokio::test]
async fn test_login_unverified_reissues_code() {
    let f = fixture();
    f.service.register(EMAIL).await.unwrap();
    let code = f.email.last_code_for(EMAIL).unwrap();
    f.service.verify_code(EMAIL, &wrong_code(&code)).await.unwrap_err();
    let before = f.users.find_by_email(EMAIL).await.unwrap().unwrap();

    let outcome = f.service.login(EMAIL).await.unwrap();
    assert_eq!(outcome, LoginOutcome::VerificationRequired);
    assert_eq!(f.email.sent_count(), 2);

    let after = f.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(f.email.last_code_for(EMAIL), Some(after.code.clone()));
    // Re-issue never resets failure bookkeeping
    assert_eq!(after.attempt_count, before.attempt_count);

    assert!(f.service.verify_code(EMAIL, &after.code).await.is_ok());
}

#[tokio::test]
async fn test_login_throttled_does_not_reissue() {
    let f = fixture();
    f.service.register(EMAIL).await.unwrap();
    let code = f.email.last_code_for(EMAIL).unwrap();
    for _ in 0..5 {
        f.service.verify_code(EMAIL, &wrong_code(&code)).await.unwrap_err();
    }

    let result = f.service.login(EMAIL).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::TooManyAttempts { .. }))
    ));
    assert_eq!(f.email.sent_count(), 1);
}

#[tokio::test]
async fn test_login_verified_states() {
    let f = fixture();
    registered_and_verified(&f).await;

    assert_eq!(
        f.service.login(EMAIL).await.unwrap(),
        LoginOutcome::PasswordSetRequired
    );

    let account = f.users.find_by_email(EMAIL).await.unwrap().unwrap();
    f.service.set_password(account.id, PASSWORD).await.unwrap();

    assert_eq!(
        f.service.login(EMAIL).await.unwrap(),
        LoginOutcome::PasswordEntryRequired
    );
}

#[tokio::test]
async fn test_set_password_rules() {
    let f = fixture();
    f.service.register(EMAIL).await.unwrap();
    let account = f.users.find_by_email(EMAIL).await.unwrap().unwrap();

    let result = f.service.set_password(account.id, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailVerificationRequired))
    ));

    f.service.verify_code(EMAIL, &account.code).await.unwrap();

    let result = f.service.set_password(account.id, "short").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidPassword { .. }))
    ));

    f.service.set_password(account.id, PASSWORD).await.unwrap();
    let stored = f.users.find_by_id(account.id).await.unwrap().unwrap();
    let hash = stored.password_hash.unwrap();
    assert_ne!(hash, PASSWORD);
    assert!(hash.starts_with("$2"));

    let result = f.service.set_password(account.id, "another-password").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordAlreadySet))
    ));

    let result = f.service.set_password(uuid::Uuid::new_v4(), PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_password_login() {
    let f = fixture();
    registered_and_verified(&f).await;
    let account = f.users.find_by_email(EMAIL).await.unwrap().unwrap();

    let result = f.service.login_with_password(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordSetRequired))
    ));

    f.service.set_password(account.id, PASSWORD).await.unwrap();

    let tokens = f.service.login_with_password(EMAIL, PASSWORD).await.unwrap();
    assert!(f
        .tokens
        .find_by_token(&tokens.refresh_token)
        .await
        .unwrap()
        .is_some());

    let wrong = f.service.login_with_password(EMAIL, "wrong-password").await;
    assert!(matches!(
        wrong,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));

    let unknown = f.service.login_with_password("nobody@example.com", PASSWORD).await;
    assert!(matches!(
        unknown,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_password_login_requires_verification() {
    let f = fixture();
    f.service.register(EMAIL).await.unwrap();

    let result = f.service.login_with_password(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailVerificationRequired))
    ));
}

#[tokio::test]
async fn test_refresh_and_logout() {
    let f = fixture();
    let tokens = registered_and_verified(&f).await;

    let rotated = f.service.refresh_token(&tokens.refresh_token).await.unwrap();
    let subject = f
        .service
        .token_service()
        .parse_and_validate(&rotated.access_token, TokenType::Access)
        .unwrap();
    let account = f.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(subject, account.id.to_string());

    f.service.logout(&rotated.refresh_token).await.unwrap();
    f.service.logout(&rotated.refresh_token).await.unwrap();
    assert_eq!(f.tokens.active_count().await, 0);

    let result = f.service.refresh_token(&rotated.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenInactive))
    ));
}

#[tokio::test]
async fn test_purge_expired_tokens() {
    let f = fixture();
    registered_and_verified(&f).await;

    f.clock.advance(Duration::days(8));
    assert_eq!(f.service.purge_expired_tokens().await.unwrap(), 1);
    assert_eq!(f.tokens.count().await, 0);
}
