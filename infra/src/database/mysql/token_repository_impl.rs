//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh tokens are stored as issued; lookups go through the unique index
//! on `token`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::token::RefreshTokenRecord;
use ak_core::errors::DomainError;
use ak_core::repositories::TokenRepository;

const TOKEN_COLUMNS: &str = "id, user_id, device_info_id, token, created_at, expires_at, is_active";

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value)
            .map_err(|e| DomainError::internal(format!("Invalid {} UUID: {}", column, e)))
    }

    /// Convert database row to RefreshTokenRecord
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;
        let device_info_id: Option<String> = row
            .try_get("device_info_id")
            .map_err(|e| DomainError::internal(format!("Failed to get device_info_id: {}", e)))?;

        Ok(RefreshTokenRecord {
            id: Self::parse_uuid(&id, "token")?,
            user_id: Self::parse_uuid(&user_id, "user")?,
            device_info_id: device_info_id
                .as_deref()
                .map(|value| Self::parse_uuid(value, "device"))
                .transpose()?,
            token: row
                .try_get("token")
                .map_err(|e| DomainError::internal(format!("Failed to get token: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::internal(format!("Failed to get is_active: {}", e)))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, device_info_id, token, created_at, expires_at, is_active
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(record.device_info_id.map(|id| id.to_string()))
            .bind(&record.token)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to save refresh token: {}", e)))?;

        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find refresh token: {}", e)))?;

        result.as_ref().map(Self::row_to_record).transpose()
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_active = FALSE WHERE id = ? AND is_active = TRUE",
        )
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to deactivate refresh token: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete expired tokens: {}", e)))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::info!(deleted, "Purged expired refresh tokens");
        }

        Ok(deleted)
    }
}
