//! SMS delivery provider configuration

use serde::{Deserialize, Serialize};

/// Which SMS backend the server sends through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Twilio Programmable Messaging
    Twilio,
    /// In-process mock that logs instead of sending
    Mock,
}

impl Default for SmsProvider {
    fn default() -> Self {
        SmsProvider::Mock
    }
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twilio" => Ok(SmsProvider::Twilio),
            "mock" => Ok(SmsProvider::Mock),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// SMS delivery configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Selected provider
    pub provider: SmsProvider,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: String,

    /// Twilio auth token
    #[serde(default)]
    pub auth_token: String,

    /// Sender phone number in E.164 format
    #[serde(default)]
    pub from_number: String,
}

impl SmsConfig {
    /// Create from environment variables.
    ///
    /// Defaults to the mock provider so development environments never hit
    /// a paid API by accident.
    pub fn from_env() -> Self {
        let provider = std::env::var("SMS_PROVIDER")
            .unwrap_or_else(|_| "mock".to_string())
            .parse()
            .unwrap_or(SmsProvider::Mock);

        Self {
            provider,
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
        }
    }

    /// Check that Twilio credentials are present
    pub fn has_twilio_credentials(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("twilio".parse::<SmsProvider>(), Ok(SmsProvider::Twilio));
        assert_eq!("MOCK".parse::<SmsProvider>(), Ok(SmsProvider::Mock));
        assert!("carrier-pigeon".parse::<SmsProvider>().is_err());
    }

    #[test]
    fn test_credentials_check() {
        let config = SmsConfig {
            provider: SmsProvider::Twilio,
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550001111".to_string(),
        };
        assert!(config.has_twilio_credentials());
        assert!(!SmsConfig::default().has_twilio_credentials());
    }
}
