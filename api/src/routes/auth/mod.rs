//! Authentication route handlers.
//!
//! All endpoints live under `/api/v1/auth`:
//! - `POST /send-code`   issue and deliver a verification code
//! - `POST /verify-code` exchange phone + code for a token pair
//! - `POST /refresh`     rotate the refresh token
//! - `POST /logout`      revoke the refresh token (requires auth)
//! - `GET  /session`     describe the authenticated user (requires auth)
//!
//! Successful logins and refreshes return the token pair in the JSON body
//! and also set `httpOnly` cookies, so browser clients never have to touch
//! the tokens while native clients can keep using the Authorization header.

pub mod logout;
pub mod refresh;
pub mod send_code;
pub mod session;
pub mod verify_code;

use std::sync::Arc;

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpResponse;

use ta_core::domain::value_objects::AuthResponse;
use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;
use ta_core::services::{AuthService, TokenService};
use ta_infra::cache::MemoryOtpStore;
use ta_shared::config::AppConfig;

/// Cookie carrying the JWT access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the opaque refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Shared services handed to every handler.
///
/// Generic over the user repository and SMS sender so tests can swap in
/// mocks; the passcode store is always the in-memory one.
pub struct AppState<U, S>
where
    U: UserRepository,
    S: SmsSender,
{
    pub auth: Arc<AuthService<U, S, MemoryOtpStore>>,
    pub tokens: Arc<TokenService>,
}

/// Builds the 200 response for a successful login or refresh: token pair
/// in the body plus the two auth cookies.
pub(crate) fn authenticated_response(auth: &AuthResponse, config: &AppConfig) -> HttpResponse {
    let secure = config.environment.is_production();
    HttpResponse::Ok()
        .cookie(auth_cookie(
            ACCESS_TOKEN_COOKIE,
            &auth.access_token,
            config.jwt.access_token_expiry,
            secure,
        ))
        .cookie(auth_cookie(
            REFRESH_TOKEN_COOKIE,
            &auth.refresh_token,
            config.jwt.refresh_token_expiry,
            secure,
        ))
        .json(auth)
}

fn auth_cookie(name: &'static str, value: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value.to_owned())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

/// Cookie that instructs the browser to drop the named auth cookie
pub(crate) fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_attributes() {
        let cookie = auth_cookie(ACCESS_TOKEN_COOKIE, "token-value", 86_400, false);
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(CookieDuration::seconds(86_400))
        );
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie(REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
