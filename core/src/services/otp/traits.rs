//! Trait boundaries for passcode storage and SMS delivery.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::otp::OtpEntry;

/// Errors from a passcode store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpStoreError {
    #[error("No code found for this phone number")]
    NotFound,

    #[error("Code has expired")]
    Expired,

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Keyed storage for active passcodes.
///
/// Keys are E.164 phone numbers. At most one entry exists per key; `set`
/// replaces any previous entry unconditionally.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store an entry for the given phone, replacing any existing one
    async fn set(&self, phone: &str, entry: OtpEntry) -> Result<(), OtpStoreError>;

    /// Fetch the live entry for the given phone.
    ///
    /// Returns `Err(NotFound)` when no entry exists and `Err(Expired)` when
    /// the entry's deadline has passed. An expired entry is removed as a
    /// side effect of the lookup.
    async fn get(&self, phone: &str) -> Result<OtpEntry, OtpStoreError>;

    /// Remove the entry for the given phone. Removing a missing entry is
    /// not an error.
    async fn delete(&self, phone: &str) -> Result<(), OtpStoreError>;
}

/// Errors from an SMS delivery provider
#[derive(Error, Debug)]
pub enum SmsError {
    #[error("SMS provider rejected the request: {0}")]
    Rejected(String),

    #[error("SMS provider unreachable: {0}")]
    Network(String),

    #[error("Invalid recipient number: {0}")]
    InvalidRecipient(String),
}

/// Outbound SMS delivery.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver a verification code to the given phone number.
    ///
    /// Returns the provider's message identifier on success.
    async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError>;
}
