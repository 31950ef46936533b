//! Application state and factory
//!
//! Builds the actix-web application around a shared [`AuthService`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::{AuthService, EmailSender};
use ak_shared::status_tags;
use tracing_actix_web::TracingLogger;

use crate::handlers::{json_error_handler, ApiError};
use crate::middleware::{JwtAuth, TokenVerifier};
use crate::routes::auth::{
    login, logout, password_login, refresh, register, set_password, verify_code,
};

const DEFAULT_MAX_PAYLOAD_SIZE: usize = 16 * 1024;

/// Application state that holds shared services
pub struct AppState<U, T, E>
where
    U: UserRepository,
    T: TokenRepository,
    E: EmailSender,
{
    pub auth_service: Arc<AuthService<U, T, E>>,
    /// JSON body limit in bytes
    pub max_payload_size: usize,
}

impl<U, T, E> AppState<U, T, E>
where
    U: UserRepository,
    T: TokenRepository,
    E: EmailSender,
{
    pub fn new(auth_service: Arc<AuthService<U, T, E>>) -> Self {
        Self {
            auth_service,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }

    pub fn with_max_payload_size(mut self, bytes: usize) -> Self {
        self.max_payload_size = bytes;
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, T, E>(
    app_state: web::Data<AppState<U, T, E>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    let verifier: Arc<dyn TokenVerifier> = app_state.auth_service.token_service();
    let json_config = web::JsonConfig::default()
        .limit(app_state.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .route("/register", web::post().to(register::<U, T, E>))
                .route("/login", web::post().to(login::<U, T, E>))
                .route("/verify-code", web::post().to(verify_code::<U, T, E>))
                .route("/refresh", web::post().to(refresh::<U, T, E>))
                .service(
                    web::resource("/password")
                        .wrap(JwtAuth::new())
                        .route(web::post().to(set_password::<U, T, E>)),
                )
                .route("/password-login", web::post().to(password_login::<U, T, E>))
                .route("/logout", web::post().to(logout::<U, T, E>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "authkit-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::new(status_tags::NOT_FOUND))
}
