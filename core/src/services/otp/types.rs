//! Result types for passcode operations.

use chrono::{DateTime, Utc};

/// Outcome of issuing a passcode
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// Provider message identifier for the delivered SMS
    pub message_id: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Outcome of checking a submitted passcode.
///
/// These are distinct business outcomes, not errors; infrastructure
/// failures surface as `Err(DomainError)` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched; the entry has been consumed
    Valid,
    /// A live code exists but the submitted value does not match
    Incorrect,
    /// No code is on record for this phone
    NotFound,
    /// A code was issued but its window has closed
    Expired,
}

impl VerifyOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }
}
