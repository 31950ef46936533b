use actix_web::{web, HttpResponse};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, VerifyCodeRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/verify-code
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "code": "1234" }
/// ```
///
/// ## Success (200 OK)
/// `VERIFICATION_SUCCESSFUL` with `access_token`, `refresh_token` and
/// `expires_in` (absolute access-token expiry).
///
/// ## Errors
/// - 400 `INVALID_EMAIL_FORMAT`, `INVALID_CODE_FORMAT`
/// - 404 `USER_NOT_FOUND`
/// - 208 `EMAIL_ALREADY_VERIFIED`, `EMAIL_ALREADY_VERIFIED_PASSWORD_SET`
/// - 429 `TOO_MANY_ATTEMPTS` with `details.retry_after_seconds`
/// - 401 `INVALID_CODE` with `details.remaining_attempts`
pub async fn verify_code<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    let tokens = state
        .auth_service
        .verify_code(&request.email, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_tokens(
        status_tags::VERIFICATION_SUCCESSFUL,
        "Email verified",
        tokens,
    )))
}
