//! HTTP error mapping for the API layer.
//!
//! Handlers return `Result<HttpResponse, ApiError>`; actix renders the
//! error through [`ResponseError`]. Every response body uses the shared
//! [`ErrorResponse`] envelope so clients can branch on the stable `error`
//! code instead of parsing messages.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use ta_core::errors::{AuthError, DomainError, TokenError};
use ta_shared::types::ErrorResponse;

/// Error type returned by every route handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => domain_status(err),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => {
                ErrorResponse::new("VALIDATION_ERROR", "Invalid request data")
                    .with_details(validation_details(errors))
            }
            ApiError::Domain(err) => {
                if matches!(
                    err,
                    DomainError::Internal { .. }
                        | DomainError::Token(TokenError::TokenGenerationFailed)
                ) {
                    // Do not leak backend detail to clients
                    error!(error = %err, "internal error while handling request");
                    ErrorResponse::new(err.error_code(), "An internal error occurred")
                } else {
                    ErrorResponse::from(err)
                }
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Maps a domain error to its HTTP status.
///
/// The three verification outcomes stay distinguishable on the wire: a
/// wrong code is 401, a missing code is 404 and an expired code is 410.
fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(auth) => match auth {
            AuthError::IncorrectCode => StatusCode::UNAUTHORIZED,
            AuthError::CodeNotFound => StatusCode::NOT_FOUND,
            AuthError::CodeExpired => StatusCode::GONE,
            AuthError::SmsDeliveryFailed => StatusCode::BAD_GATEWAY,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
        },
        DomainError::Token(token) => match token {
            TokenError::TokenGenerationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        },
    }
}

fn validation_details(errors: &ValidationErrors) -> HashMap<String, serde_json::Value> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| err.code.to_string())
                })
                .collect();
            ((*field).to_string(), serde_json::json!(messages))
        })
        .collect()
}
