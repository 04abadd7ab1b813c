//! Error types for the domain layer.
//!
//! `DomainError` is the single error type crossing the service boundary.
//! Specific failures live in the sub-enums in [`types`] and are lifted in
//! via transparent `#[from]` bridges, so `?` works from anywhere in the
//! domain without manual mapping.

pub mod types;

pub use types::{AuthError, TokenError};

use ta_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Top-level domain error
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for the named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Unauthorized => "UNAUTHORIZED",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(err) => err.error_code(),
            DomainError::Token(err) => err.error_code(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_bridges_into_domain_error() {
        let err: DomainError = AuthError::CodeExpired.into();
        assert_eq!(err.error_code(), "OTP_EXPIRED");
        assert_eq!(err.to_string(), "Verification code has expired");
    }

    #[test]
    fn test_token_error_bridges_into_domain_error() {
        let err: DomainError = TokenError::InvalidRefreshToken.into();
        assert_eq!(err.error_code(), "INVALID_REFRESH_TOKEN");
    }

    #[test]
    fn test_validation_error_response() {
        let err = DomainError::validation("phone number is required");
        let response: ErrorResponse = (&err).into();
        assert_eq!(response.error, "VALIDATION_ERROR");
        assert!(response.message.contains("phone number is required"));
    }

    #[test]
    fn test_internal_error_code() {
        let err = DomainError::internal("store backend unavailable");
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
