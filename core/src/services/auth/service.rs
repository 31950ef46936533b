//! Main authentication service implementation

use std::sync::Arc;

use ak_shared::validation::{is_valid_email, mask_email, normalize_email};
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::domain::value_objects::{AuthTokens, LoginOutcome, Registration};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::clock::{Clock, SystemClock};
use crate::services::email::EmailSender;
use crate::services::token::TokenService;
use crate::services::verification::{generate_code, AttemptThrottle, VerificationService};

use super::config::AuthServiceConfig;
use super::password::{hash_password, validate_password, verify_password};

/// Authentication service for managing the complete email authentication flow
pub struct AuthService<U, T, E>
where
    U: UserRepository,
    T: TokenRepository,
    E: EmailSender,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Verification state machine
    verification_service: VerificationService<U, T>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
    /// Outbound email transport
    email_sender: Arc<E>,
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T, E> AuthService<U, T, E>
where
    U: UserRepository,
    T: TokenRepository,
    E: EmailSender,
{
    /// Create a new authentication service using the system clock
    pub fn new(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        email_sender: Arc<E>,
        config: AuthServiceConfig,
    ) -> Self {
        Self::with_clock(
            user_repository,
            token_repository,
            email_sender,
            config,
            Arc::new(SystemClock),
        )
    }

    /// Create a new authentication service with an explicit time source
    pub fn with_clock(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        email_sender: Arc<E>,
        config: AuthServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let token_service = Arc::new(TokenService::with_clock(
            token_repository,
            config.token.clone(),
            clock.clone(),
        ));
        let verification_service = VerificationService::new(
            user_repository.clone(),
            token_service.clone(),
            AttemptThrottle::from(&config.throttle),
            clock.clone(),
        );

        Self {
            user_repository,
            verification_service,
            token_service,
            email_sender,
            clock,
            config,
        }
    }

    /// Token service shared with the request authentication middleware
    pub fn token_service(&self) -> Arc<TokenService<T>> {
        self.token_service.clone()
    }

    /// Create an account for `email` and send it a verification code
    ///
    /// # Returns
    ///
    /// * `Ok(Registration)` - Account created and code delivered
    /// * `Err(DomainError)` - Invalid email, existing account, store or email failure
    pub async fn register(&self, email: &str) -> DomainResult<Registration> {
        let email = Self::normalized_email(email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        self.create_account(email).await
    }

    /// Login-or-register entry point
    ///
    /// Unknown emails are registered. Unverified accounts receive a fresh code
    /// unless they are throttled. Verified accounts are told which credential
    /// step comes next.
    pub async fn login(&self, email: &str) -> DomainResult<LoginOutcome> {
        let email = Self::normalized_email(email)?;

        let account = match self.user_repository.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                let registration = self.create_account(email).await?;
                return Ok(LoginOutcome::Registered(registration));
            }
        };

        if account.email_verified {
            return Ok(if account.has_password() {
                LoginOutcome::PasswordEntryRequired
            } else {
                LoginOutcome::PasswordSetRequired
            });
        }

        let now = self.clock.now();
        let throttle = self.verification_service.throttle();
        if throttle.is_throttled(&account, now) {
            return Err(AuthError::TooManyAttempts {
                retry_after_seconds: throttle.retry_after_seconds(&account, now),
            }
            .into());
        }

        let code = generate_code();
        self.user_repository.update_code(account.id, &code, now).await?;
        self.send_code(&account.email, &code).await?;

        tracing::info!(
            user_id = %account.id,
            email = %mask_email(&account.email),
            event = "verification_code_reissued",
            "Verification code re-issued for unverified account"
        );

        Ok(LoginOutcome::VerificationRequired)
    }

    /// Verify an emailed code and issue a token pair
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<AuthTokens> {
        self.verification_service.verify_code(email, code).await
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<AuthTokens> {
        self.token_service.refresh(refresh_token).await
    }

    /// Set the password credential of a verified account
    pub async fn set_password(&self, user_id: Uuid, password: &str) -> DomainResult<()> {
        validate_password(password, &self.config.password)?;

        let account = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !account.email_verified {
            return Err(AuthError::EmailVerificationRequired.into());
        }
        if account.has_password() {
            return Err(AuthError::PasswordAlreadySet.into());
        }

        let hash = hash_password(password.to_string(), self.config.password.hash_cost).await?;
        let stored = self
            .user_repository
            .set_password_hash(account.id, &hash, self.clock.now())
            .await?;
        if !stored {
            return Err(AuthError::PasswordAlreadySet.into());
        }

        tracing::info!(user_id = %account.id, event = "password_set", "Password credential set");
        Ok(())
    }

    /// Authenticate with email and password and issue a token pair
    pub async fn login_with_password(&self, email: &str, password: &str) -> DomainResult<AuthTokens> {
        let email = Self::normalized_email(email)?;

        let account = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.email_verified {
            return Err(AuthError::EmailVerificationRequired.into());
        }
        let hash = account
            .password_hash
            .clone()
            .ok_or(AuthError::PasswordSetRequired)?;

        if !verify_password(password.to_string(), hash).await? {
            tracing::warn!(
                email = %mask_email(&email),
                event = "password_login_failed",
                "Password login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.token_service.issue_token_pair(account.id).await?;
        tracing::info!(user_id = %account.id, event = "password_login", "Password login succeeded");
        Ok(tokens)
    }

    /// Deactivate a refresh token; repeated logout with the same token succeeds
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        if !self.token_service.revoke(refresh_token).await? {
            tracing::debug!(event = "logout_repeated", "Refresh token was already inactive");
        }
        Ok(())
    }

    /// Delete expired refresh token records
    pub async fn purge_expired_tokens(&self) -> DomainResult<u64> {
        let removed = self.token_service.purge_expired().await?;
        tracing::info!(removed = removed, event = "tokens_purged", "Expired refresh tokens purged");
        Ok(removed)
    }

    fn normalized_email(email: &str) -> Result<String, ValidationError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(email)
    }

    async fn create_account(&self, email: String) -> DomainResult<Registration> {
        let code = generate_code();
        let account = UserAccount::new(email, code.clone(), self.clock.now());

        let account = self
            .user_repository
            .create(account)
            .await
            .map_err(|e| match e {
                DomainError::Auth(AuthError::UserAlreadyExists) => e,
                other => {
                    tracing::error!(error = %other, "Failed to create user account");
                    AuthError::UserCreationFailed.into()
                }
            })?;

        self.send_code(&account.email, &code).await?;

        tracing::info!(
            user_id = %account.id,
            email = %mask_email(&account.email),
            event = "user_registered",
            "Account created and verification code sent"
        );

        Ok(Registration {
            user_id: account.id,
            email: account.email,
        })
    }

    async fn send_code(&self, email: &str, code: &str) -> DomainResult<()> {
        let message = self.config.email.render(email, code);
        match self.email_sender.send_email(&message).await {
            Ok(message_id) => {
                tracing::debug!(email = %mask_email(email), message_id = %message_id, "Verification email sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(email = %mask_email(email), error = %e, "Failed to send verification email");
                Err(AuthError::EmailDeliveryFailed.into())
            }
        }
    }
}
