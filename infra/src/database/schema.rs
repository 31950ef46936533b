//! Table definitions for the MySQL store.
//!
//! Statements are idempotent and run in order by
//! [`DatabasePool::ensure_schema`](crate::database::DatabasePool::ensure_schema).

/// `users`: one row per normalized email address
pub const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id CHAR(36) NOT NULL PRIMARY KEY,
        email VARCHAR(254) NOT NULL,
        code CHAR(4) NOT NULL,
        email_verified BOOLEAN NOT NULL DEFAULT FALSE,
        password_hash VARCHAR(255) NULL,
        attempt_count INT UNSIGNED NOT NULL DEFAULT 0,
        last_attempt_time DATETIME(6) NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_users_email (email)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// `refresh_tokens`: one row per issued refresh token, never rewritten in place
pub const CREATE_REFRESH_TOKENS: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_tokens (
        id CHAR(36) NOT NULL PRIMARY KEY,
        user_id CHAR(36) NOT NULL,
        device_info_id CHAR(36) NULL,
        token VARCHAR(512) NOT NULL,
        created_at DATETIME(6) NOT NULL,
        expires_at DATETIME(6) NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        UNIQUE KEY uq_refresh_tokens_token (token),
        KEY idx_refresh_tokens_user_id (user_id),
        KEY idx_refresh_tokens_expires_at (expires_at),
        CONSTRAINT fk_refresh_tokens_user FOREIGN KEY (user_id)
            REFERENCES users (id) ON DELETE CASCADE
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// All statements in dependency order
pub const STATEMENTS: [&str; 2] = [CREATE_USERS, CREATE_REFRESH_TOKENS];
