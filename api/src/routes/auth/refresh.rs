//! Handler for POST /api/v1/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ta_core::errors::{DomainError, TokenError};
use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;
use ta_shared::config::AppConfig;

use crate::dto::auth::RefreshTokenRequest;
use crate::error::ApiError;
use crate::routes::auth::{authenticated_response, AppState, REFRESH_TOKEN_COOKIE};

/// Exchanges a refresh token for a fresh token pair.
///
/// The token comes from the JSON body when present, otherwise from the
/// `refresh_token` cookie. Rotation is strict: the presented token is
/// invalidated either way, so a replayed refresh token gets 401.
pub async fn refresh<U, S>(
    state: web::Data<AppState<U, S>>,
    config: web::Data<AppConfig>,
    request: HttpRequest,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsSender + 'static,
{
    if let Some(body) = &body {
        body.validate()?;
    }

    let token = body
        .as_ref()
        .map(|body| body.refresh_token.clone())
        .or_else(|| {
            request
                .cookie(REFRESH_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
        })
        .ok_or_else(|| ApiError::from(DomainError::Token(TokenError::InvalidRefreshToken)))?;

    let auth = state.auth.refresh_token(&token).await?;

    Ok(authenticated_response(&auth, &config))
}
