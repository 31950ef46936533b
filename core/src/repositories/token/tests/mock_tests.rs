//! Unit tests for mock token repository implementation

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn record(user_id: Uuid, token: &str, ttl: Duration) -> RefreshTokenRecord {
    let now = Utc::now();
    RefreshTokenRecord::new(user_id, token.to_string(), now, now + ttl)
}

#[tokio::test]
async fn test_save_and_find_by_token() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    let saved = repo.save(record(user_id, "token-a", Duration::days(7))).await.unwrap();

    let found = repo.find_by_token("token-a").await.unwrap().unwrap();
    assert_eq!(found.id, saved.id);
    assert_eq!(found.user_id, user_id);
    assert!(found.is_active);

    assert!(repo.find_by_token("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_token_rejected() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(record(user_id, "same", Duration::days(7))).await.unwrap();
    assert!(repo.save(record(user_id, "same", Duration::days(7))).await.is_err());
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_deactivate_only_once() {
    let repo = MockTokenRepository::new();
    let saved = repo.save(record(Uuid::new_v4(), "t", Duration::days(7))).await.unwrap();

    assert!(repo.deactivate(saved.id).await.unwrap());
    assert!(!repo.deactivate(saved.id).await.unwrap());
    assert!(!repo.deactivate(Uuid::new_v4()).await.unwrap());

    let found = repo.find_by_token("t").await.unwrap().unwrap();
    assert!(!found.is_active);
    assert_eq!(repo.active_count().await, 0);
}

#[tokio::test]
async fn test_delete_expired() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(record(user_id, "expired", Duration::seconds(-10))).await.unwrap();
    repo.save(record(user_id, "valid", Duration::days(1))).await.unwrap();

    let deleted = repo.delete_expired(Utc::now()).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(repo.find_by_token("expired").await.unwrap().is_none());
    assert!(repo.find_by_token("valid").await.unwrap().is_some());
}

#[tokio::test]
async fn test_failure_flags() {
    let repo = MockTokenRepository::new();
    let saved = repo.save(record(Uuid::new_v4(), "t", Duration::days(7))).await.unwrap();

    repo.set_fail_updates(true);
    assert!(repo.deactivate(saved.id).await.is_err());

    repo.set_fail_saves(true);
    assert!(repo.save(record(Uuid::new_v4(), "u", Duration::days(7))).await.is_err());
}
