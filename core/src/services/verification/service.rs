//! Verification state machine: checks a submitted code and issues tokens

use std::sync::Arc;

use ak_shared::validation::{is_valid_code, is_valid_email, mask_email, normalize_email};

use crate::domain::entities::user::UserAccount;
use crate::domain::value_objects::AuthTokens;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::token::TokenService;

use super::code::codes_match;
use super::throttle::AttemptThrottle;

/// Decides whether a code is valid for an account right now and, on success,
/// verifies the account and issues a token pair
pub struct VerificationService<U: UserRepository, T: TokenRepository> {
    users: Arc<U>,
    tokens: Arc<TokenService<T>>,
    throttle: AttemptThrottle,
    clock: Arc<dyn Clock>,
}

impl<U: UserRepository, T: TokenRepository> VerificationService<U, T> {
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService<T>>,
        throttle: AttemptThrottle,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            tokens,
            throttle,
            clock,
        }
    }

    pub fn throttle(&self) -> &AttemptThrottle {
        &self.throttle
    }

    /// Verify `code` for the account registered under `email`
    ///
    /// Decision order:
    /// 1. input shape (email, 4-digit code)
    /// 2. account exists
    /// 3. not already verified
    /// 4. an attempt is claimed, refused while throttled
    /// 5. code matches the stored one
    /// 6. conditional verify, only one concurrent caller wins
    /// 7. token pair issued and refresh record persisted
    ///
    /// Steps after 6 are not rolled back on failure; a retry reports
    /// `AlreadyVerified`.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<AuthTokens> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_code(code) {
            return Err(ValidationError::InvalidCodeFormat.into());
        }

        let account = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if account.email_verified {
            return Err(AuthError::AlreadyVerified {
                password_set: account.has_password(),
            }
            .into());
        }

        let now = self.clock.now();
        let attempts = match self
            .users
            .reserve_attempt(
                account.id,
                self.throttle.max_attempts(),
                self.throttle.window_start(now),
                now,
            )
            .await?
        {
            Some(attempts) => attempts,
            None => return Err(self.reject_throttled(&account, &email).await),
        };

        if !codes_match(code, &account.code) {
            let remaining_attempts = self.throttle.remaining_attempts(attempts);
            tracing::warn!(
                email = %mask_email(&email),
                attempts = attempts,
                remaining_attempts = remaining_attempts,
                event = "verification_failed",
                "Invalid verification code"
            );
            return Err(AuthError::InvalidCode { remaining_attempts }.into());
        }

        if !self.users.mark_verified(account.id, now).await? {
            // Another request verified the account between our read and write
            let password_set = self
                .users
                .find_by_id(account.id)
                .await?
                .map(|u| u.has_password())
                .unwrap_or(false);
            return Err(AuthError::AlreadyVerified { password_set }.into());
        }

        if let Err(e) = self.users.reset_attempts(account.id).await {
            tracing::warn!(
                user_id = %account.id,
                error = %e,
                "Failed to reset verification attempts"
            );
        }

        let tokens = self.tokens.issue_token_pair(account.id).await?;

        tracing::info!(
            user_id = %account.id,
            email = %mask_email(&email),
            event = "email_verified",
            "Email verified and tokens issued"
        );

        Ok(tokens)
    }

    /// Build the cooldown error from the latest stored attempt state
    async fn reject_throttled(&self, account: &UserAccount, email: &str) -> DomainError {
        let current = match self.users.find_by_id(account.id).await {
            Ok(Some(current)) => current,
            Ok(None) => return AuthError::UserNotFound.into(),
            Err(e) => return e,
        };

        let retry_after_seconds = self
            .throttle
            .retry_after_seconds(&current, self.clock.now())
            .max(1);
        tracing::warn!(
            email = %mask_email(email),
            attempts = current.attempt_count,
            retry_after_seconds = retry_after_seconds,
            event = "verification_throttled",
            "Verification attempt rejected during cooldown"
        );

        AuthError::TooManyAttempts { retry_after_seconds }.into()
    }
}
