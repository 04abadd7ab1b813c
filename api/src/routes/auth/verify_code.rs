//! Handler for POST /api/v1/auth/verify-code

use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;
use ta_shared::config::AppConfig;

use crate::dto::auth::VerifyCodeRequest;
use crate::error::ApiError;
use crate::routes::auth::{authenticated_response, AppState};

/// Verifies a submitted code and signs the caller in.
///
/// The three failure modes are distinguishable: 401 for a wrong code
/// (the stored code survives for another attempt), 404 when no code is
/// pending for the phone, 410 when the code exists but its window has
/// passed. A correct code is consumed and cannot be replayed.
pub async fn verify_code<U, S>(
    state: web::Data<AppState<U, S>>,
    config: web::Data<AppConfig>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsSender + 'static,
{
    request.validate()?;

    let auth = state
        .auth
        .verify_code(&request.phone, &request.code)
        .await?;

    Ok(authenticated_response(&auth, &config))
}
