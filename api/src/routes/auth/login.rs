use actix_web::{web, HttpResponse};
use ak_core::repositories::{TokenRepository, UserRepository};
use ak_core::services::EmailSender;
use ak_core::LoginOutcome;
use ak_shared::status_tags;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ApiResponse, EmailRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/login
///
/// Login-or-register by email. Only a brand-new email is a 200; every other
/// outcome tells the client which step comes next:
/// - 401 `EMAIL_VERIFICATION_REQUIRED` (a fresh code was sent)
/// - 401 `PASSWORD_SET_REQUIRED`
/// - 401 `PASSWORD_ENTRY_REQUIRED`
pub async fn login<U, T, E>(
    state: web::Data<AppState<U, T, E>>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    E: EmailSender + 'static,
{
    request.validate().map_err(|e| ApiError::from_validation(&e))?;

    match state.auth_service.login(&request.email).await? {
        LoginOutcome::Registered(registration) => {
            let response =
                ApiResponse::new(status_tags::REGISTRATION_SUCCESSFUL, "Verification code sent")
                .add_detail("user_id", registration.user_id)
                .add_detail("email", registration.email);
            Ok(HttpResponse::Ok().json(response))
        }
        outcome => Err(ApiError::new(outcome.status())),
    }
}
