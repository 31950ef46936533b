//! Request and response bodies

pub mod auth_dto;

pub use auth_dto::{
    ApiResponse, EmailRequest, PasswordLoginRequest, RefreshTokenRequest, SetPasswordRequest,
    VerifyCodeRequest,
};
