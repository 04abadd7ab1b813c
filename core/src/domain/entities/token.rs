//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `expiry_secs` - Lifetime of the token in seconds
    /// * `issuer` - Value of the `iss` claim
    pub fn new_access_token(user_id: Uuid, expiry_secs: i64, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_secs);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Whether the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// An access token and its paired refresh token, as handed to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque refresh token (raw, never stored server-side)
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, 86_400, "textauth");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, "textauth");
        assert_eq!(claims.exp - claims.iat, 86_400);
        assert_eq!(claims.nbf, claims.iat);
        assert!(!claims.is_expired());
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_expired_claims() {
        let claims = Claims::new_access_token(Uuid::new_v4(), -10, "textauth");
        assert!(claims.is_expired());
    }

    #[test]
    fn test_jti_is_unique_per_token() {
        let user_id = Uuid::new_v4();
        let a = Claims::new_access_token(user_id, 60, "textauth");
        let b = Claims::new_access_token(user_id, 60, "textauth");
        assert_ne!(a.jti, b.jti);
    }
}
