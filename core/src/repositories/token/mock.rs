//! In-memory implementation of TokenRepository for tests and local wiring

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository keyed by token string
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
    fail_saves: AtomicBool,
    fail_updates: AtomicBool,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            fail_saves: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Make `save` fail with a store error
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Make `deactivate` fail with a store error
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of stored records
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Number of active records
    pub async fn active_count(&self) -> usize {
        self.tokens.read().await.values().filter(|t| t.is_active).count()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::internal("refresh token store unavailable"));
        }

        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&record.token) {
            return Err(DomainError::internal("duplicate refresh token"));
        }

        tokens.insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).cloned())
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, DomainError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::internal("refresh token store unavailable"));
        }

        let mut tokens = self.tokens.write().await;
        match tokens.values_mut().find(|t| t.id == id) {
            Some(record) if record.is_active => {
                record.is_active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}
