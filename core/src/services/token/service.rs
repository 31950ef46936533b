//! Main token service implementation

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, IssuedToken, RefreshTokenRecord, TokenType};
use crate::domain::value_objects::AuthTokens;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::TokenRepository;
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenServiceConfig;

/// Service for signing JWTs and managing refresh token records
pub struct TokenService<T: TokenRepository> {
    pub(crate) repository: Arc<T>,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<T: TokenRepository> TokenService<T> {
    /// Creates a new token service backed by the system clock
    pub fn new(repository: Arc<T>, config: TokenServiceConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit time source
    pub fn with_clock(
        repository: Arc<T>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock after the type check
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            repository,
            config,
            clock,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Expiry for an access token issued now
    ///
    /// `SigningError` when the configured lifetime does not fit a timestamp.
    pub fn access_expiry(&self) -> Result<DateTime<Utc>, TokenError> {
        self.expiry_after(Duration::try_hours(self.config.access_token_expiry_hours))
    }

    /// Expiry for a refresh token issued now
    pub fn refresh_expiry(&self) -> Result<DateTime<Utc>, TokenError> {
        self.expiry_after(Duration::try_days(self.config.refresh_token_expiry_days))
    }

    fn expiry_after(&self, lifetime: Option<Duration>) -> Result<DateTime<Utc>, TokenError> {
        lifetime
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                tracing::error!("Configured token lifetime overflows the timestamp range");
                TokenError::SigningError
            })
    }

    /// Signs an access token for `subject`
    pub fn issue_access_token(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue(subject, TokenType::Access, self.access_expiry()?)
    }

    /// Signs a refresh token for `subject`
    pub fn issue_refresh_token(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue(subject, TokenType::Refresh, self.refresh_expiry()?)
    }

    fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        expires_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        if self.config.jwt_secret.is_empty() {
            return Err(TokenError::SigningError);
        }

        let claims = Claims::new(subject, token_type, self.clock.now(), expires_at);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, token_type = %token_type, "Failed to sign token");
                TokenError::SigningError
            })?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Parses a presented token and returns its subject
    ///
    /// Checks run in a fixed order: signature and structure, token type,
    /// expiry, subject.
    pub fn parse_and_validate(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<String, TokenError> {
        if self.config.jwt_secret.is_empty() {
            return Err(TokenError::InvalidToken);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidToken)?;
        let claims = data.claims;

        if claims.token_type != expected.as_str() {
            return Err(TokenError::InvalidTokenType);
        }

        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::TokenExpired);
        }

        if claims.sub.is_empty() {
            return Err(TokenError::SubjectMissing);
        }

        Ok(claims.sub)
    }

    /// Validates an access token and returns the user id it was issued for
    pub fn authenticate(&self, token: &str) -> Result<Uuid, TokenError> {
        let subject = self.parse_and_validate(token, TokenType::Access)?;
        Uuid::parse_str(&subject).map_err(|_| TokenError::InvalidToken)
    }

    /// Issues an access/refresh pair for `user_id` and persists the refresh record
    pub async fn issue_token_pair(&self, user_id: Uuid) -> Result<AuthTokens, DomainError> {
        let subject = user_id.to_string();

        let access = self.issue_access_token(&subject).map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Access token issuance failed");
            AuthError::TokenIssuanceFailed
        })?;
        let refresh = self.issue_refresh_token(&subject).map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Refresh token issuance failed");
            AuthError::TokenIssuanceFailed
        })?;

        let record = RefreshTokenRecord::new(
            user_id,
            refresh.token.clone(),
            self.clock.now(),
            refresh.expires_at,
        );
        self.repository.save(record).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to persist refresh token");
            AuthError::TokenPersistenceFailed
        })?;

        Ok(AuthTokens::new(access.token, refresh.token, access.expires_at))
    }

    /// Exchanges an active refresh token for a new pair
    ///
    /// The presented record is deactivated before the replacement row is
    /// written, so a token can be exchanged at most once.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, DomainError> {
        let subject = self.parse_and_validate(refresh_token, TokenType::Refresh)?;

        let record = self
            .repository
            .find_by_token(refresh_token)
            .await?
            .ok_or(TokenError::RefreshTokenNotFound)?;

        if !record.is_active {
            tracing::warn!(
                user_id = %record.user_id,
                event = "refresh_inactive_token",
                "Inactive refresh token presented"
            );
            return Err(TokenError::RefreshTokenInactive.into());
        }

        if subject != record.user_id.to_string() {
            tracing::warn!(
                user_id = %record.user_id,
                event = "refresh_subject_mismatch",
                "Refresh token subject does not match its stored owner"
            );
            return Err(TokenError::InvalidToken.into());
        }

        let new_refresh = self
            .issue_refresh_token(&subject)
            .map_err(|_| AuthError::TokenIssuanceFailed)?;
        let access = self
            .issue_access_token(&subject)
            .map_err(|_| AuthError::TokenIssuanceFailed)?;

        let deactivated = self.repository.deactivate(record.id).await.map_err(|e| {
            tracing::error!(user_id = %record.user_id, error = %e, "Failed to deactivate refresh token");
            TokenError::RefreshUpdateFailed
        })?;
        if !deactivated {
            // A concurrent exchange consumed this token first
            return Err(TokenError::RefreshTokenInactive.into());
        }

        let replacement = RefreshTokenRecord::new(
            record.user_id,
            new_refresh.token.clone(),
            self.clock.now(),
            new_refresh.expires_at,
        )
        .with_device(record.device_info_id);
        self.repository.save(replacement).await.map_err(|e| {
            tracing::error!(user_id = %record.user_id, error = %e, "Failed to persist rotated refresh token");
            TokenError::RefreshUpdateFailed
        })?;

        tracing::info!(user_id = %record.user_id, event = "token_refreshed", "Refresh token rotated");

        Ok(AuthTokens::new(access.token, new_refresh.token, access.expires_at))
    }

    /// Deactivates the record behind a refresh token
    ///
    /// Returns `Ok(false)` when the record was already inactive.
    pub async fn revoke(&self, refresh_token: &str) -> Result<bool, DomainError> {
        self.parse_and_validate(refresh_token, TokenType::Refresh)?;

        let record = self
            .repository
            .find_by_token(refresh_token)
            .await?
            .ok_or(TokenError::RefreshTokenNotFound)?;

        let deactivated = self.repository.deactivate(record.id).await.map_err(|e| {
            tracing::error!(user_id = %record.user_id, error = %e, "Failed to revoke refresh token");
            TokenError::RefreshUpdateFailed
        })?;

        Ok(deactivated)
    }

    /// Removes expired refresh token records
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        self.repository.delete_expired(self.clock.now()).await
    }
}
