use actix_web::{web, HttpResponse};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, EmailRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/register
///
/// Creates an unverified account and emails it a verification code.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// ## Errors
/// - 400 `INVALID_EMAIL_FORMAT`
/// - 409 `USER_ALREADY_EXISTS`
/// - 500 `USER_CREATION_FAILED`, `EMAIL_SEND_FAILED`
pub async fn register<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    let registration = state.auth_service.register(&request.email).await?;

    let response = ApiResponse::new(
        status_tags::REGISTRATION_SUCCESSFUL,
        "Verification code sent",
    )
    .add_detail("user_id", registration.user_id)
    .add_detail("email", registration.email);

    Ok(HttpResponse::Ok().json(response))
}
