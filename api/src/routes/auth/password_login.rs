use actix_web::{web, HttpResponse};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, PasswordLoginRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/password-login
///
/// ## Errors
/// - 401 `INVALID_CREDENTIALS` (unknown email and wrong password look the same)
/// - 401 `EMAIL_VERIFICATION_REQUIRED`, `PASSWORD_SET_REQUIRED`
pub async fn password_login<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    request: web::Json<PasswordLoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    let tokens = state
        .auth_service
        .login_with_password(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_tokens(
        status_tags::LOGIN_SUCCESSFUL,
        "Login successful",
        tokens,
    )))
}
