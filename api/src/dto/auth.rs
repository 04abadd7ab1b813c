//! Authentication request and response DTOs.
//!
//! Validation here is deliberately shallow: phone numbers are only checked
//! for a plausible length, because the domain layer normalizes them to
//! E.164 by prefixing `+` and nothing more. The code field must be the
//! exact four digits the issuer produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ta_core::domain::entities::user::User;

/// Request body for POST /api/v1/auth/send-code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Phone number to deliver the verification code to
    #[validate(length(min = 4, max = 16, message = "Phone number must be 4 to 16 characters"))]
    pub phone: String,
}

/// Request body for POST /api/v1/auth/verify-code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Phone number the code was sent to
    #[validate(length(min = 4, max = 16, message = "Phone number must be 4 to 16 characters"))]
    pub phone: String,

    /// The submitted verification code
    #[validate(length(equal = 4, message = "Verification code must be exactly 4 digits"))]
    pub code: String,
}

/// Optional request body for POST /api/v1/auth/refresh.
///
/// Clients may send the refresh token in the body; browser clients can
/// omit the body entirely and rely on the `refresh_token` cookie.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

/// Response body for a successfully issued verification code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    /// Human-readable confirmation
    pub message: String,

    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Response body for GET /api/v1/auth/session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub phone: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for SessionResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            phone: user.phone,
            is_verified: user.is_verified,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_accepts_e164_phone() {
        let request = SendCodeRequest {
            phone: "+15551234567".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_code_request_rejects_empty_phone() {
        let request = SendCodeRequest {
            phone: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_verify_code_request_requires_four_digit_code() {
        let mut request = VerifyCodeRequest {
            phone: "+15551234567".to_string(),
            code: "4821".to_string(),
        };
        assert!(request.validate().is_ok());

        request.code = "482".to_string();
        assert!(request.validate().is_err());

        request.code = "48213".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_session_response_from_user() {
        let user = User::new("+15551234567");
        let response = SessionResponse::from(user.clone());
        assert_eq!(response.user_id, user.id);
        assert_eq!(response.phone, "+15551234567");
        assert!(!response.is_verified);
        assert!(response.last_login_at.is_none());
    }
}
