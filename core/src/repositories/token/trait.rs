//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for RefreshTokenRecord persistence operations
///
/// Records are keyed by the signed token string. Rotation never rewrites a
/// token in place: the old row is deactivated and a new row is saved.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token)
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a record by its token string
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Flip `is_active` from true to false
    ///
    /// # Returns
    /// * `Ok(true)` - This call deactivated the record
    /// * `Ok(false)` - The record was already inactive or does not exist
    async fn deactivate(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete records whose expiry is at or before `now`
    ///
    /// Returns the number of deleted rows.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
