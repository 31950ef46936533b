//! User repository trait defining the interface for account persistence.
//!
//! Every mutation the verification flow depends on is a single conditional
//! statement in the backing store, so concurrent requests for the same
//! account cannot both win a state transition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// Repository trait for UserAccount persistence operations
///
/// # Example
/// ```no_run
/// # use ak_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_email("user@example.com").await? {
///     Some(user) => println!("verified: {}", user.email_verified),
///     None => println!("no account"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError>;

    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(UserAccount)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email already taken
    async fn create(&self, user: UserAccount) -> Result<UserAccount, DomainError>;

    /// Flip `email_verified` from false to true
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the transition
    /// * `Ok(false)` - The account was already verified or does not exist
    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Claim one verification attempt before the code is compared
    ///
    /// The claim is refused without any change while `attempt_count` is at or
    /// above `max_attempts` and the last attempt is later than `window_start`.
    /// Otherwise the counter is incremented and the attempt time stamped in
    /// the same conditional write.
    ///
    /// # Returns
    /// * `Ok(Some(count))` - Counter value after the increment
    /// * `Ok(None)` - The account is inside its cooldown window
    /// * `Err(DomainError::NotFound { .. })` - No such account
    async fn reserve_attempt(
        &self,
        id: Uuid,
        max_attempts: u32,
        window_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<u32>, DomainError>;

    /// Reset the failed-attempt counter and clear the attempt time
    async fn reset_attempts(&self, id: Uuid) -> Result<(), DomainError>;

    /// Replace the stored verification code
    async fn update_code(&self, id: Uuid, code: &str, now: DateTime<Utc>) -> Result<(), DomainError>;

    /// Store a password hash when none is set yet
    ///
    /// # Returns
    /// * `Ok(true)` - The hash was stored
    /// * `Ok(false)` - A password was already set or the account does not exist
    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
