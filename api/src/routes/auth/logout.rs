//! Handler for POST /api/v1/auth/logout

use actix_web::{web, HttpResponse};

use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;
use ta_shared::types::MessageResponse;

use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::routes::auth::{removal_cookie, AppState, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

/// Revokes the caller's refresh token and clears the auth cookies.
///
/// The access token itself stays valid until it expires; revocation only
/// covers the refresh path.
pub async fn logout<U, S>(
    state: web::Data<AppState<U, S>>,
    context: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsSender + 'static,
{
    state.auth.logout(context.user_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(removal_cookie(REFRESH_TOKEN_COOKIE))
        .json(MessageResponse::new("Logged out successfully")))
}
