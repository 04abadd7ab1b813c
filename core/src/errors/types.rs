//! Domain-specific error types for authentication and token operations.
//!
//! Each variant maps to a stable SCREAMING_SNAKE error code on the wire so
//! clients can branch on outcomes without parsing messages. In particular
//! the three passcode failures are distinct: `CodeNotFound` (nothing was
//! ever sent, or it was already consumed), `CodeExpired` (sent but too
//! late), and `IncorrectCode` (live entry, wrong value).

use ta_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect verification code")]
    IncorrectCode,

    #[error("No verification code was issued for this phone number")]
    CodeNotFound,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Failed to deliver the verification message")]
    SmsDeliveryFailed,

    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::IncorrectCode => "OTP_INCORRECT",
            AuthError::CodeNotFound => "OTP_NOT_FOUND",
            AuthError::CodeExpired => "OTP_EXPIRED",
            AuthError::SmsDeliveryFailed => "SMS_DELIVERY_FAILED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}
