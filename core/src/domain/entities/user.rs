//! User entity representing a registered phone number in the TextAuth system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account keyed by phone number.
///
/// Accounts are created the first time a verification code is requested for
/// a number and become verified once a code is successfully validated. The
/// active refresh token is stored as a SHA-256 hash on the row; rotating or
/// logging out replaces or clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Phone number in E.164 format
    pub phone: String,

    /// Whether the phone number has been verified by a passcode
    pub is_verified: bool,

    /// Hash of the currently active refresh token, if any
    #[serde(default, skip_serializing)]
    pub refresh_token_hash: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new, unverified user for a phone number
    pub fn new(phone: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            is_verified: false,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Marks the user as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Installs a new refresh token hash, replacing any previous one
    pub fn rotate_refresh_token(&mut self, token_hash: impl Into<String>) {
        self.refresh_token_hash = Some(token_hash.into());
        self.updated_at = Utc::now();
    }

    /// Clears the stored refresh token hash
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token_hash = None;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new("+15551234567");

        assert_eq!(user.phone, "+15551234567");
        assert!(!user.is_verified);
        assert!(user.refresh_token_hash.is_none());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_user_verification() {
        let mut user = User::new("+15551234567");

        assert!(!user.is_verified);
        user.verify();
        assert!(user.is_verified);
    }

    #[test]
    fn test_update_last_login() {
        let mut user = User::new("+15551234567");

        assert!(user.last_login_at.is_none());
        user.update_last_login();
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_refresh_token_rotation() {
        let mut user = User::new("+15551234567");

        user.rotate_refresh_token("hash-one");
        assert_eq!(user.refresh_token_hash.as_deref(), Some("hash-one"));

        user.rotate_refresh_token("hash-two");
        assert_eq!(user.refresh_token_hash.as_deref(), Some("hash-two"));

        user.clear_refresh_token();
        assert!(user.refresh_token_hash.is_none());
    }

    #[test]
    fn test_refresh_token_hash_is_not_serialized() {
        let mut user = User::new("+15551234567");
        user.rotate_refresh_token("secret-hash");

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("refresh_token_hash").is_none());
        assert_eq!(json["phone"], "+15551234567");
    }
}
