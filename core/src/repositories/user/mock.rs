//! In-memory implementation of UserRepository for tests and local wiring

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::{AuthError, DomainError};
use crate::services::verification::AttemptThrottle;

use super::trait_::UserRepository;

/// Mock user repository backed by a map keyed on user id
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
    fail_reset_attempts: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail_reset_attempts: AtomicBool::new(false),
        }
    }

    /// Make `reset_attempts` fail, for exercising best-effort paths
    pub fn set_fail_reset_attempts(&self, fail: bool) {
        self.fail_reset_attempts.store(fail, Ordering::SeqCst);
    }

    /// Insert an account directly, bypassing duplicate checks
    pub async fn insert(&self, user: UserAccount) {
        self.users.write().await.insert(user.id, user);
    }

    /// Number of stored accounts
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: UserAccount) -> Result<UserAccount, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) if !user.email_verified => {
                user.email_verified = true;
                user.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn reserve_attempt(
        &self,
        id: Uuid,
        max_attempts: u32,
        window_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<u32>, DomainError> {
        let mut users = self.users.write().await;

        let user = users.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "User".to_string(),
        })?;
        let in_window = user.last_attempt_time.is_some_and(|last| last > window_start);
        if user.attempt_count >= max_attempts && in_window {
            return Ok(None);
        }

        AttemptThrottle::record_attempt(user, now);
        user.updated_at = now;
        Ok(Some(user.attempt_count))
    }

    async fn reset_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        if self.fail_reset_attempts.load(Ordering::SeqCst) {
            return Err(DomainError::internal("reset_attempts unavailable"));
        }

        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            AttemptThrottle::reset(user);
        }
        Ok(())
    }

    async fn update_code(&self, id: Uuid, code: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        let user = users.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "User".to_string(),
        })?;
        user.code = code.to_string();
        user.updated_at = now;
        Ok(())
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        match users.get_mut(&id) {
            Some(user) if user.password_hash.is_none() => {
                user.password_hash = Some(password_hash.to_string());
                user.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
