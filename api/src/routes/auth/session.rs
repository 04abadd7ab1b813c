//! Handler for GET /api/v1/auth/session

use actix_web::{web, HttpResponse};

use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;

use crate::dto::auth::SessionResponse;
use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::routes::auth::AppState;

/// Returns the authenticated user's profile.
pub async fn session<U, S>(
    state: web::Data<AppState<U, S>>,
    context: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsSender + 'static,
{
    let user = state.auth.current_user(context.user_id).await?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(user)))
}
