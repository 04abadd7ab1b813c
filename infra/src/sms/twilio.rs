//! Twilio SMS provider.
//!
//! Talks to the Twilio REST API directly over `reqwest` with HTTP Basic
//! auth. Phone numbers are masked in every log line and codes are never
//! logged.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

use ta_core::services::otp::{SmsError, SmsSender};
use ta_shared::config::sms::SmsConfig;
use ta_shared::utils::phone::mask_phone_number;

use crate::error::InfraError;

use super::verification_message;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

// Twilio error code for an invalid 'To' number.
const ERROR_INVALID_TO_NUMBER: i64 = 21211;

#[derive(Debug, Deserialize)]
struct MessageCreatedResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    code: Option<i64>,
    message: Option<String>,
}

/// Sends verification codes through Twilio's Messages endpoint.
#[derive(Debug)]
pub struct TwilioSmsSender {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioSmsSender {
    /// Builds a sender from configuration.
    ///
    /// Fails when credentials are missing or the from number is not in
    /// E.164 form, so misconfiguration is caught at startup rather than
    /// on the first send.
    pub fn new(config: &SmsConfig) -> Result<Self, InfraError> {
        if !config.has_twilio_credentials() {
            return Err(InfraError::Config(
                "Twilio credentials are not configured (TWILIO_ACCOUNT_SID, \
                 TWILIO_AUTH_TOKEN, TWILIO_FROM_NUMBER)"
                    .to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfraError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS provider initialized"
        );

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError> {
        let masked = mask_phone_number(phone);
        let body = verification_message(code);
        let params = [
            ("To", phone),
            ("From", self.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|err| {
                error!(phone = %masked, error = %err, "Twilio request failed");
                SmsError::Network(err.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let created: MessageCreatedResponse = response.json().await.map_err(|err| {
                SmsError::Rejected(format!("unreadable Twilio response: {err}"))
            })?;
            info!(phone = %masked, sid = %created.sid, "SMS submitted to Twilio");
            return Ok(created.sid);
        }

        let api_error = response.json::<ApiErrorResponse>().await.ok();
        let detail = api_error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| status.to_string());
        error!(phone = %masked, status = %status, error = %detail, "Twilio rejected SMS");

        if api_error.and_then(|e| e.code) == Some(ERROR_INVALID_TO_NUMBER) {
            Err(SmsError::InvalidRecipient(detail))
        } else {
            Err(SmsError::Rejected(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_shared::config::sms::SmsProvider;

    fn config_with_credentials() -> SmsConfig {
        SmsConfig {
            provider: SmsProvider::Twilio,
            account_sid: "ACtest".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550000000".to_string(),
        }
    }

    #[test]
    fn test_new_requires_credentials() {
        let config = SmsConfig {
            provider: SmsProvider::Twilio,
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
        };
        assert!(TwilioSmsSender::new(&config).is_err());
    }

    #[test]
    fn test_new_rejects_from_number_without_prefix() {
        let config = SmsConfig {
            from_number: "15550000000".to_string(),
            ..config_with_credentials()
        };
        let err = TwilioSmsSender::new(&config).unwrap_err();
        assert!(err.to_string().contains("E.164"));
    }

    #[test]
    fn test_messages_url_embeds_account_sid() {
        let sender = TwilioSmsSender::new(&config_with_credentials()).unwrap();
        assert_eq!(
            sender.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/ACtest/Messages.json"
        );
    }
}
