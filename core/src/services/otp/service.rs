//! Passcode issuance and verification flows.

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use tracing::{error, info, warn};

use ta_shared::utils::phone::mask_phone_number;

use crate::domain::entities::otp::{OtpEntry, DEFAULT_TTL_MINUTES};
use crate::errors::{AuthError, DomainError, DomainResult};

use super::generator::CodeGenerator;
use super::traits::{OtpStore, OtpStoreError, SmsSender};
use super::types::{SendCodeResult, VerifyOutcome};

/// Issues and verifies one-time passcodes.
///
/// Storage and delivery are injected; the service owns generation, the
/// expiry policy, and the single-use contract.
pub struct OtpService<S: SmsSender, C: OtpStore> {
    sms: Arc<S>,
    store: Arc<C>,
    generator: CodeGenerator,
    code_ttl: Duration,
}

impl<S: SmsSender, C: OtpStore> OtpService<S, C> {
    pub fn new(sms: Arc<S>, store: Arc<C>) -> Self {
        Self {
            sms,
            store,
            generator: CodeGenerator::new(),
            code_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }

    /// Replace the code generator, e.g. with a seeded one in tests
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Override the validity window for issued codes
    pub fn with_code_ttl(mut self, ttl: std::time::Duration) -> Self {
        self.code_ttl =
            Duration::from_std(ttl).unwrap_or_else(|_| Duration::minutes(DEFAULT_TTL_MINUTES));
        self
    }

    /// Issue a fresh code for `phone` and deliver it by SMS.
    ///
    /// Delivery happens before the code is recorded, so a failed send
    /// leaves no stored state behind. Issuing again for the same phone
    /// replaces the previous code.
    pub async fn issue(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let code = self.generator.generate();

        let message_id = self.sms.send_code(phone, &code).await.map_err(|err| {
            error!(
                phone = %mask_phone_number(phone),
                error = %err,
                "verification SMS delivery failed"
            );
            DomainError::from(AuthError::SmsDeliveryFailed)
        })?;

        let entry = OtpEntry::new(code, self.code_ttl);
        let expires_at = entry.expires_at;

        self.store.set(phone, entry).await.map_err(|err| {
            error!(
                phone = %mask_phone_number(phone),
                error = %err,
                "failed to record verification code"
            );
            DomainError::internal(format!("passcode store: {err}"))
        })?;

        info!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            "verification code issued"
        );

        Ok(SendCodeResult {
            message_id,
            expires_at,
        })
    }

    /// Check a submitted code against the stored one.
    ///
    /// Business outcomes come back as `Ok(VerifyOutcome)`; only
    /// infrastructure failures are `Err`. A mismatch leaves the stored
    /// entry in place so the caller may retry within the window; a match
    /// consumes it.
    pub async fn verify(&self, phone: &str, submitted: &str) -> DomainResult<VerifyOutcome> {
        let entry = match self.store.get(phone).await {
            Ok(entry) => entry,
            Err(OtpStoreError::NotFound) => return Ok(VerifyOutcome::NotFound),
            Err(OtpStoreError::Expired) => return Ok(VerifyOutcome::Expired),
            Err(OtpStoreError::Backend(message)) => {
                error!(
                    phone = %mask_phone_number(phone),
                    error = %message,
                    "passcode store lookup failed"
                );
                return Err(DomainError::internal(format!("passcode store: {message}")));
            }
        };

        if !constant_time_compare(&entry.code, submitted) {
            info!(phone = %mask_phone_number(phone), "verification code mismatch");
            return Ok(VerifyOutcome::Incorrect);
        }

        // Single use: a matched code must never validate twice. A failed
        // delete is logged and swallowed since the caller already proved
        // possession of the code.
        if let Err(err) = self.store.delete(phone).await {
            warn!(
                phone = %mask_phone_number(phone),
                error = %err,
                "failed to remove consumed verification code"
            );
        }

        info!(phone = %mask_phone_number(phone), "verification code accepted");
        Ok(VerifyOutcome::Valid)
    }
}

/// Compare two codes without leaking the match position through timing
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.len() == b.len() && constant_time_eq(a.as_bytes(), b.as_bytes())
}
