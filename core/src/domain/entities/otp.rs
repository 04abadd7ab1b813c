//! One-time passcode entry, the unit held by an [`OtpStore`].
//!
//! An entry is keyed externally by the identifier (phone number) it was
//! issued for; at most one entry exists per identifier at any instant. The
//! entry itself only carries the secret and its validity window.
//!
//! [`OtpStore`]: crate::services::otp::OtpStore

use chrono::{DateTime, Duration, Utc};

/// Number of digits in a generated passcode
pub const CODE_LENGTH: usize = 4;

/// Smallest value a passcode can take (inclusive)
pub const CODE_MIN: u32 = 1000;

/// Largest value a passcode can take (inclusive)
pub const CODE_MAX: u32 = 9999;

/// Default validity window for an issued passcode
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// A stored passcode together with its validity window.
///
/// The entry is valid in `[issued_at, expires_at)`. Once `now >= expires_at`
/// it must be treated as absent regardless of whether the background sweep
/// has removed it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    /// The 4-digit passcode as issued
    pub code: String,

    /// When the code was issued
    pub issued_at: DateTime<Utc>,

    /// When the code stops being valid
    pub expires_at: DateTime<Utc>,
}

impl OtpEntry {
    /// Creates an entry valid for `ttl` starting now.
    pub fn new(code: impl Into<String>, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            code: code.into(),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// Creates an entry with the default five-minute window.
    pub fn with_default_ttl(code: impl Into<String>) -> Self {
        Self::new(code, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    /// Whether the validity window has passed.
    ///
    /// The window is half-open, so an entry observed exactly at
    /// `expires_at` is already expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Remaining validity, clamped to zero once expired.
    pub fn time_remaining(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_entry_is_not_expired() {
        let entry = OtpEntry::with_default_ttl("4821");
        assert_eq!(entry.code, "4821");
        assert!(!entry.is_expired());
        assert_eq!(entry.expires_at - entry.issued_at, Duration::minutes(5));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = OtpEntry::new("1111", Duration::milliseconds(30));
        assert!(!entry.is_expired());

        thread::sleep(std::time::Duration::from_millis(50));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let entry = OtpEntry::new("2222", Duration::zero());
        assert!(entry.is_expired());
    }

    #[test]
    fn test_time_remaining_clamps_to_zero() {
        let live = OtpEntry::new("3333", Duration::minutes(5));
        assert!(live.time_remaining() > Duration::zero());

        let dead = OtpEntry::new("4444", Duration::zero());
        assert_eq!(dead.time_remaining(), Duration::zero());
    }
}
