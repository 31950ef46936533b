use actix_web::{web, HttpResponse};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, RefreshTokenRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented token is
/// deactivated and cannot be exchanged again.
///
/// ## Errors
/// - 401 `INVALID_TOKEN`, `INVALID_TOKEN_TYPE`, `TOKEN_EXPIRED`, `SUBJECT_MISSING`,
///   `REFRESH_TOKEN_NOT_FOUND`, `REFRESH_TOKEN_INACTIVE`
/// - 500 `REFRESH_UPDATE_FAILED`
pub async fn refresh<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    let tokens = state.auth_service.refresh_token(&request.refresh_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_tokens(
        status_tags::TOKEN_REFRESHED,
        "Token refreshed",
        tokens,
    )))
}
