use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ak_api::{create_app, telemetry, AppState};
use ak_core::services::{AuthService, AuthServiceConfig};
use ak_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use ak_infra::email::create_email_sender;
use ak_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging);

    tracing::info!(
        environment = ?config.environment,
        "Starting AuthKit API Server"
    );
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("Signing tokens with the built-in development JWT secret");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    if config.database.auto_migrate {
        pool.ensure_schema()
            .await
            .context("Failed to bootstrap database schema")?;
    }

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let token_repository = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
    let email_sender = Arc::new(
        create_email_sender(&config.email).context("Failed to initialize email transport")?,
    );

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_repository,
        email_sender,
        AuthServiceConfig::from(&config),
    ));
    let app_state = web::Data::new(
        AppState::new(auth_service).with_max_payload_size(config.server.max_payload_size),
    );

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    tracing::info!("{}", pool.get_statistics());
    pool.close().await;
    Ok(())
}
