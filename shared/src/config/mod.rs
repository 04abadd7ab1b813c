//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and token lifetime configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `otp` - One-time passcode lifetime and eviction configuration
//! - `server` - HTTP server configuration
//! - `sms` - SMS delivery provider configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment the server runs in
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// One-time passcode configuration
    pub otp: OtpConfig,

    /// SMS delivery configuration
    pub sms: SmsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            sms: SmsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    ///
    /// Every sub-configuration falls back to its documented default when the
    /// corresponding variable is unset, so a bare development environment
    /// boots without a `.env` file.
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
            sms: SmsConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_development() {
        let config = AppConfig::default();
        assert!(config.environment.is_development());
        assert_eq!(config.server.port, 8080);
    }
}
