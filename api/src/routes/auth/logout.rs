use actix_web::{http::StatusCode, web, HttpResponse};
use ak_core::errors::{DomainError, TokenError};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, RefreshTokenRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/logout
///
/// Deactivates the presented refresh token. Logging out twice succeeds.
///
/// ## Errors
/// - 401 token validation tags
/// - 404 `REFRESH_TOKEN_NOT_FOUND`
pub async fn logout<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    state
        .auth_service
        .logout(&request.refresh_token)
        .await
        .map_err(|e| match e {
            DomainError::Token(TokenError::RefreshTokenNotFound) => {
                ApiError::from(e).with_status(StatusCode::NOT_FOUND)
            }
            e => ApiError::from(e),
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(status_tags::LOGGED_OUT, "Logged out")))
}
