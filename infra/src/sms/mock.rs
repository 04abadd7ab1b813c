//! Mock SMS provider for development and tests.
//!
//! Prints messages to the console instead of sending them, so the full
//! login flow works locally without Twilio credentials.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use ta_core::services::otp::{SmsError, SmsSender};
use ta_shared::utils::phone::mask_phone_number;

use super::verification_message;

/// SMS provider that records sends instead of performing them.
#[derive(Clone)]
pub struct MockSmsSender {
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
    console_output: bool,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
            console_output: true,
        }
    }

    /// Quiet variant for tests that do not want console noise
    pub fn quiet() -> Self {
        Self {
            console_output: false,
            ..Self::new()
        }
    }

    /// Total messages accepted so far
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Make every following send fail, or succeed again
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError> {
        let masked = mask_phone_number(phone);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked, "mock SMS provider simulating failure");
            return Err(SmsError::Network("simulated SMS failure".to_string()));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            let message = verification_message(code);
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS #{count}");
            println!("To: {phone}");
            println!("Message: {message}");
            println!("{}\n", "=".repeat(60));
        }

        info!(
            provider = "mock",
            phone = %masked,
            message_id = %message_id,
            "SMS sent (mock)"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+15551234567";

    #[tokio::test]
    async fn test_send_returns_mock_message_id() {
        let sender = MockSmsSender::quiet();
        let message_id = sender.send_code(PHONE, "4821").await.unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(sender.message_count(), 1);
    }

    #[tokio::test]
    async fn test_counter_tracks_each_send() {
        let sender = MockSmsSender::quiet();
        for expected in 1..=3 {
            sender.send_code(PHONE, "4821").await.unwrap();
            assert_eq!(sender.message_count(), expected);
        }
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let sender = MockSmsSender::quiet();
        sender.set_simulate_failure(true);

        assert!(sender.send_code(PHONE, "4821").await.is_err());
        assert_eq!(sender.message_count(), 0);

        sender.set_simulate_failure(false);
        assert!(sender.send_code(PHONE, "4821").await.is_ok());
    }
}
