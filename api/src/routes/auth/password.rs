use actix_web::{web, HttpResponse};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, SetPasswordRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/v1/auth/password
///
/// Sets the password credential for the authenticated account. Requires a
/// bearer access token; the account must be verified and have no password yet.
///
/// ## Errors
/// - 400 `INVALID_PASSWORD`
/// - 401 `EMAIL_VERIFICATION_REQUIRED`
/// - 404 `USER_NOT_FOUND`
/// - 409 `PASSWORD_ALREADY_SET`
pub async fn set_password<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    auth: AuthContext,
    request: web::Json<SetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    state
        .auth_service
        .set_password(auth.user_id, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(status_tags::PASSWORD_SET, "Password set")))
}
