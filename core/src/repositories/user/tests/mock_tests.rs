//! Unit tests for mock user repository implementation

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn account(email: &str) -> UserAccount {
    UserAccount::new(email.to_string(), "1234".to_string(), Utc::now())
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repo = MockUserRepository::new();
    let user = account("user@example.com");

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let by_email = repo.find_by_email("user@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    let by_id = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("user@example.com".to_string()));

    assert!(repo.find_by_email("other@example.com").await.unwrap().is_none());
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockUserRepository::new();
    repo.create(account("user@example.com")).await.unwrap();

    let result = repo.create(account("user@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_mark_verified_only_once() {
    let repo = MockUserRepository::new();
    let user = repo.create(account("user@example.com")).await.unwrap();

    assert!(repo.mark_verified(user.id, Utc::now()).await.unwrap());
    assert!(!repo.mark_verified(user.id, Utc::now()).await.unwrap());
    assert!(!repo.mark_verified(Uuid::new_v4(), Utc::now()).await.unwrap());

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.email_verified);
}

#[tokio::test]
async fn test_reserved_attempts_and_reset() {
    let repo = MockUserRepository::new();
    let user = repo.create(account("user@example.com")).await.unwrap();
    let at = Utc::now();
    let window_start = at - Duration::minutes(15);

    assert_eq!(repo.reserve_attempt(user.id, 5, window_start, at).await.unwrap(), Some(1));
    assert_eq!(repo.reserve_attempt(user.id, 5, window_start, at).await.unwrap(), Some(2));

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.attempt_count, 2);
    assert_eq!(stored.last_attempt_time, Some(at));

    repo.reset_attempts(user.id).await.unwrap();
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.attempt_count, 0);
    assert!(stored.last_attempt_time.is_none());

    let missing = repo.reserve_attempt(Uuid::new_v4(), 5, window_start, at).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_reserve_refused_inside_window() {
    let repo = MockUserRepository::new();
    let user = repo.create(account("user@example.com")).await.unwrap();
    let at = Utc::now();
    let window_start = at - Duration::minutes(15);

    for expected in 1..=3 {
        let count = repo.reserve_attempt(user.id, 3, window_start, at).await.unwrap();
        assert_eq!(count, Some(expected));
    }
    assert_eq!(repo.reserve_attempt(user.id, 3, window_start, at).await.unwrap(), None);
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.attempt_count, 3);

    // Once the last attempt falls out of the window one more claim goes through
    let later = at + Duration::minutes(15);
    let count = repo.reserve_attempt(user.id, 3, at, later).await.unwrap();
    assert_eq!(count, Some(4));
    assert_eq!(repo.reserve_attempt(user.id, 3, at, later).await.unwrap(), None);
}

#[tokio::test]
async fn test_reset_failure_flag() {
    let repo = MockUserRepository::new();
    let user = repo.create(account("user@example.com")).await.unwrap();

    repo.set_fail_reset_attempts(true);
    assert!(repo.reset_attempts(user.id).await.is_err());
}

#[tokio::test]
async fn test_update_code() {
    let repo = MockUserRepository::new();
    let user = repo.create(account("user@example.com")).await.unwrap();

    repo.update_code(user.id, "9876", Utc::now()).await.unwrap();
    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.code, "9876");

    assert!(repo.update_code(Uuid::new_v4(), "0000", Utc::now()).await.is_err());
}

#[tokio::test]
async fn test_set_password_hash_only_once() {
    let repo = MockUserRepository::new();
    let user = repo.create(account("user@example.com")).await.unwrap();

    assert!(repo.set_password_hash(user.id, "hash-1", Utc::now()).await.unwrap());
    assert!(!repo.set_password_hash(user.id, "hash-2", Utc::now()).await.unwrap());

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash.as_deref(), Some("hash-1"));
}
