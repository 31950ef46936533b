//! MySQL implementation of the UserRepository trait.
//!
//! State transitions the verification flow races on (`reserve_attempt`,
//! `mark_verified`, `set_password_hash`) are single conditional UPDATEs; the
//! winner is the caller that sees one affected row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::user::UserAccount;
use ak_core::errors::{AuthError, DomainError};
use ak_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, code, email_verified, password_hash, attempt_count, \
                            last_attempt_time, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to UserAccount entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<UserAccount, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        Ok(UserAccount {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::internal(format!("Failed to get code: {}", e)))?,
            email_verified: row
                .try_get("email_verified")
                .map_err(|e| DomainError::internal(format!("Failed to get email_verified: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?,
            attempt_count: row
                .try_get("attempt_count")
                .map_err(|e| DomainError::internal(format!("Failed to get attempt_count: {}", e)))?,
            last_attempt_time: row
                .try_get::<Option<DateTime<Utc>>, _>("last_attempt_time")
                .map_err(|e| {
                    DomainError::internal(format!("Failed to get last_attempt_time: {}", e))
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    fn not_found() -> DomainError {
        DomainError::NotFound {
            resource: "User".to_string(),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user by email: {}", e)))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find user by id: {}", e)))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: UserAccount) -> Result<UserAccount, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, code, email_verified, password_hash, attempt_count,
                last_attempt_time, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.code)
            .bind(user.email_verified)
            .bind(&user.password_hash)
            .bind(user.attempt_count)
            .bind(user.last_attempt_time)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                }
                _ => DomainError::internal(format!("Failed to create user: {}", e)),
            })?;

        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET email_verified = TRUE, updated_at = ? \
             WHERE id = ? AND email_verified = FALSE",
        )
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to mark user verified: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn reserve_attempt(
        &self,
        id: Uuid,
        max_attempts: u32,
        window_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<u32>, DomainError> {
        // The UPDATE holds the row lock until commit, so the SELECT reads this call's increment
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to begin transaction: {}", e)))?;

        let result = sqlx::query(
            "UPDATE users SET attempt_count = attempt_count + 1, last_attempt_time = ?,              updated_at = ? WHERE id = ? AND NOT (attempt_count >= ?              AND last_attempt_time IS NOT NULL AND last_attempt_time > ?)",
        )
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .bind(max_attempts)
        .bind(window_start)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to reserve attempt: {}", e)))?;

        let row = sqlx::query("SELECT attempt_count FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to read attempt count: {}", e)))?
            .ok_or_else(Self::not_found)?;

        let count: u32 = row
            .try_get("attempt_count")
            .map_err(|e| DomainError::internal(format!("Failed to get attempt_count: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to commit transaction: {}", e)))?;

        Ok((result.rows_affected() == 1).then_some(count))
    }

    async fn reset_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET attempt_count = 0, last_attempt_time = NULL WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to reset attempts: {}", e)))?;

        Ok(())
    }

    async fn update_code(&self, id: Uuid, code: &str, now: DateTime<Utc>) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET code = ?, updated_at = ? WHERE id = ?")
            .bind(code)
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to update code: {}", e)))?;

        // MySQL reports changed rows, so an identical rewrite also yields zero
        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(Self::not_found());
        }

        Ok(())
    }

    async fn set_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = ? \
             WHERE id = ? AND password_hash IS NULL",
        )
        .bind(password_hash)
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to set password hash: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }
}
