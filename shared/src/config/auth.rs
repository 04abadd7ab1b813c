//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            access_token_expiry: 86_400,      // 24 hours
            refresh_token_expiry: 2_592_000,  // 30 days
            issuer: String::from("textauth"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-change-in-production".to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86_400);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "2592000".to_string())
            .parse()
            .unwrap_or(2_592_000);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "textauth".to_string());

        Self {
            secret,
            access_token_expiry,
            refresh_token_expiry,
            issuer,
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 86_400);
        assert_eq!(config.refresh_token_expiry, 2_592_000);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_builders() {
        let config = JwtConfig::new("s3cret")
            .with_access_expiry_minutes(15)
            .with_refresh_expiry_days(7);
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
        assert!(!config.is_using_default_secret());
    }
}
