//! Handler for POST /api/v1/auth/send-code

use actix_web::{web, HttpResponse};
use validator::Validate;

use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;

use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::error::ApiError;
use crate::routes::auth::AppState;

/// Issues a verification code and delivers it over SMS.
///
/// Creates the user record on first contact, so a phone number that has
/// never been seen before can still log in. Returns 502 when the SMS
/// provider rejects the message; in that case no code was stored.
pub async fn send_code<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsSender + 'static,
{
    request.validate()?;

    let result = state.auth.send_code(&request.phone).await?;

    Ok(HttpResponse::Ok().json(SendCodeResponse {
        message: "Verification code sent successfully".to_string(),
        expires_at: result.expires_at,
    }))
}
