//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;

/// Authentication response returned after a successful login or refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Token scheme clients should use in the Authorization header
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates an authentication response from a generated token pair
    pub fn from_token_pair(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: String::from("Bearer"),
            expires_in: pair.expires_in,
        }
    }
}
