//! Authentication orchestration.
//!
//! Ties the passcode flow to user records and token issuance: request a
//! code, prove possession of it, and come away with a session.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use ta_shared::utils::phone::{mask_phone_number, normalize_phone_number};

use crate::domain::entities::user::User;
use crate::domain::value_objects::auth_response::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::user::UserRepository;
use crate::services::otp::{OtpService, OtpStore, SendCodeResult, SmsSender, VerifyOutcome};
use crate::services::token::TokenService;

/// End-to-end authentication service.
///
/// `U` is the user store, `S` the SMS provider, `C` the passcode store.
pub struct AuthService<U, S, C>
where
    U: UserRepository,
    S: SmsSender,
    C: OtpStore,
{
    users: Arc<U>,
    otp: Arc<OtpService<S, C>>,
    tokens: Arc<TokenService>,
}

impl<U, S, C> AuthService<U, S, C>
where
    U: UserRepository,
    S: SmsSender,
    C: OtpStore,
{
    pub fn new(users: Arc<U>, otp: Arc<OtpService<S, C>>, tokens: Arc<TokenService>) -> Self {
        Self { users, otp, tokens }
    }

    /// Request a verification code for a phone number.
    ///
    /// Unknown numbers get an unverified user record up front, so the
    /// login flow later only has to flip the verified flag.
    pub async fn send_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let phone = normalize_phone_number(phone);
        if phone.is_empty() {
            return Err(DomainError::validation("phone number is required"));
        }

        if self.users.find_by_phone(&phone).await?.is_none() {
            let user = User::new(phone.clone());
            self.users.create(&user).await?;
            info!(
                user_id = %user.id,
                phone = %mask_phone_number(&phone),
                "registered new user"
            );
        }

        self.otp.issue(&phone).await
    }

    /// Exchange a verification code for a session.
    ///
    /// Every non-valid passcode outcome maps to its own error so clients
    /// can distinguish a wrong code from a missing or expired one.
    pub async fn verify_code(&self, phone: &str, code: &str) -> DomainResult<AuthResponse> {
        let phone = normalize_phone_number(phone);
        if phone.is_empty() {
            return Err(DomainError::validation("phone number is required"));
        }
        if code.is_empty() {
            return Err(DomainError::validation("verification code is required"));
        }

        match self.otp.verify(&phone, code).await? {
            VerifyOutcome::Valid => {}
            VerifyOutcome::Incorrect => return Err(AuthError::IncorrectCode.into()),
            VerifyOutcome::NotFound => return Err(AuthError::CodeNotFound.into()),
            VerifyOutcome::Expired => return Err(AuthError::CodeExpired.into()),
        }

        let existing = self.users.find_by_phone(&phone).await?;
        let is_new = existing.is_none();
        let mut user = existing.unwrap_or_else(|| User::new(phone.clone()));

        user.verify();
        user.update_last_login();

        let (pair, refresh_hash) = self.tokens.issue_token_pair(user.id)?;
        user.rotate_refresh_token(refresh_hash);

        if is_new {
            self.users.create(&user).await?;
        } else {
            self.users.update(&user).await?;
        }

        info!(
            user_id = %user.id,
            phone = %mask_phone_number(&phone),
            "login successful"
        );

        Ok(AuthResponse::from_token_pair(pair))
    }

    /// Rotate a refresh token into a new session.
    ///
    /// The old token is invalidated by the rotation; presenting it again
    /// fails the hash lookup.
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        if refresh_token.is_empty() {
            return Err(TokenError::InvalidRefreshToken.into());
        }

        let hash = TokenService::hash_token(refresh_token);
        let mut user = self
            .users
            .find_by_refresh_token_hash(&hash)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        let (pair, refresh_hash) = self.tokens.issue_token_pair(user.id)?;
        user.rotate_refresh_token(refresh_hash);
        self.users.update(&user).await?;

        info!(user_id = %user.id, "refresh token rotated");
        Ok(AuthResponse::from_token_pair(pair))
    }

    /// Invalidate the user's refresh token
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.clear_refresh_token();
        self.users.update(&user).await?;

        info!(user_id = %user.id, "logged out");
        Ok(())
    }

    /// Load the user behind an authenticated session
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use ta_shared::config::auth::JwtConfig;

    use crate::domain::entities::otp::OtpEntry;
    use crate::repositories::user::MockUserRepository;
    use crate::services::otp::traits::{OtpStoreError, SmsError};
    use crate::services::otp::CodeGenerator;

    #[derive(Default)]
    struct RecordingSms {
        sent: Mutex<Vec<(String, String)>>,
        fail: AtomicBool,
    }

    impl RecordingSms {
        async fn last_code(&self) -> Option<String> {
            self.sent.lock().await.last().map(|(_, c)| c.clone())
        }
    }

    #[async_trait]
    impl SmsSender for RecordingSms {
        async fn send_code(&self, phone: &str, code: &str) -> Result<String, SmsError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(SmsError::Network("provider down".to_string()));
            }
            let mut sent = self.sent.lock().await;
            sent.push((phone.to_string(), code.to_string()));
            Ok(format!("msg-{}", sent.len()))
        }
    }

    #[derive(Default)]
    struct MapStore {
        entries: Mutex<HashMap<String, OtpEntry>>,
    }

    #[async_trait]
    impl OtpStore for MapStore {
        async fn set(&self, phone: &str, entry: OtpEntry) -> Result<(), OtpStoreError> {
            self.entries.lock().await.insert(phone.to_string(), entry);
            Ok(())
        }

        async fn get(&self, phone: &str) -> Result<OtpEntry, OtpStoreError> {
            let mut entries = self.entries.lock().await;
            match entries.get(phone) {
                None => Err(OtpStoreError::NotFound),
                Some(entry) if entry.is_expired() => {
                    entries.remove(phone);
                    Err(OtpStoreError::Expired)
                }
                Some(entry) => Ok(entry.clone()),
            }
        }

        async fn delete(&self, phone: &str) -> Result<(), OtpStoreError> {
            self.entries.lock().await.remove(phone);
            Ok(())
        }
    }

    struct Fixture {
        service: AuthService<MockUserRepository, RecordingSms, MapStore>,
        users: MockUserRepository,
        sms: Arc<RecordingSms>,
        tokens: Arc<TokenService>,
    }

    fn fixture() -> Fixture {
        let users = MockUserRepository::new();
        let sms = Arc::new(RecordingSms::default());
        let store = Arc::new(MapStore::default());
        let otp = Arc::new(
            OtpService::new(sms.clone(), store).with_generator(CodeGenerator::from_seed(7)),
        );
        let tokens = Arc::new(TokenService::new(JwtConfig {
            secret: "test-secret-for-unit-tests".to_string(),
            ..JwtConfig::default()
        }));
        let service = AuthService::new(Arc::new(users.clone()), otp, tokens.clone());
        Fixture {
            service,
            users,
            sms,
            tokens,
        }
    }

    const PHONE: &str = "+15551234567";

    #[tokio::test]
    async fn test_send_code_registers_unknown_number() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();

        let user = fx.users.find_by_phone(PHONE).await.unwrap().unwrap();
        assert!(!user.is_verified);
        assert_eq!(fx.users.count().await, 1);
    }

    #[tokio::test]
    async fn test_send_code_normalizes_missing_prefix() {
        let fx = fixture();

        fx.service.send_code("15551234567").await.unwrap();

        assert!(fx.users.find_by_phone(PHONE).await.unwrap().is_some());
        let sent = fx.sms.sent.lock().await;
        assert_eq!(sent[0].0, PHONE);
    }

    #[tokio::test]
    async fn test_send_code_reuses_existing_user() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();
        fx.service.send_code(PHONE).await.unwrap();

        assert_eq!(fx.users.count().await, 1);
    }

    #[tokio::test]
    async fn test_send_code_rejects_empty_phone() {
        let fx = fixture();
        let err = fx.service.send_code("   ").await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_send_code_sms_failure_surfaces() {
        let fx = fixture();
        fx.sms.fail.store(true, Ordering::SeqCst);

        let err = fx.service.send_code(PHONE).await.unwrap_err();
        assert_eq!(err.error_code(), "SMS_DELIVERY_FAILED");
    }

    #[tokio::test]
    async fn test_verify_code_logs_user_in() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();
        let code = fx.sms.last_code().await.unwrap();

        let response = fx.service.verify_code(PHONE, &code).await.unwrap();
        assert_eq!(response.token_type, "Bearer");

        let user = fx.users.find_by_phone(PHONE).await.unwrap().unwrap();
        assert!(user.is_verified);
        assert!(user.last_login_at.is_some());
        assert_eq!(
            user.refresh_token_hash,
            Some(TokenService::hash_token(&response.refresh_token))
        );

        let claims = fx.tokens.verify_access_token(&response.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
    }

    #[tokio::test]
    async fn test_verify_code_distinguishes_failures() {
        let fx = fixture();

        // Nothing issued yet.
        let err = fx.service.verify_code(PHONE, "1234").await.unwrap_err();
        assert_eq!(err.error_code(), "OTP_NOT_FOUND");

        fx.service.send_code(PHONE).await.unwrap();
        let code = fx.sms.last_code().await.unwrap();
        let wrong = if code == "0000" { "0001" } else { "0000" };

        let err = fx.service.verify_code(PHONE, wrong).await.unwrap_err();
        assert_eq!(err.error_code(), "OTP_INCORRECT");

        // The mismatch left the code in place.
        fx.service.verify_code(PHONE, &code).await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_code_is_single_use() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();
        let code = fx.sms.last_code().await.unwrap();

        fx.service.verify_code(PHONE, &code).await.unwrap();
        let err = fx.service.verify_code(PHONE, &code).await.unwrap_err();
        assert_eq!(err.error_code(), "OTP_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_refresh_token_rotates() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();
        let code = fx.sms.last_code().await.unwrap();
        let first = fx.service.verify_code(PHONE, &code).await.unwrap();

        let second = fx
            .service
            .refresh_token(&first.refresh_token)
            .await
            .unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);

        // The replaced token no longer works.
        let err = fx
            .service
            .refresh_token(&first.refresh_token)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_REFRESH_TOKEN");
    }

    #[tokio::test]
    async fn test_refresh_token_rejects_unknown() {
        let fx = fixture();
        let err = fx.service.refresh_token("bogus-token").await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_REFRESH_TOKEN");
    }

    #[tokio::test]
    async fn test_logout_clears_refresh_token() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();
        let code = fx.sms.last_code().await.unwrap();
        let response = fx.service.verify_code(PHONE, &code).await.unwrap();

        let user = fx.users.find_by_phone(PHONE).await.unwrap().unwrap();
        fx.service.logout(user.id).await.unwrap();

        let user = fx.users.find_by_id(user.id).await.unwrap().unwrap();
        assert!(user.refresh_token_hash.is_none());

        let err = fx
            .service
            .refresh_token(&response.refresh_token)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_REFRESH_TOKEN");
    }

    #[tokio::test]
    async fn test_logout_unknown_user_fails() {
        let fx = fixture();
        let err = fx.service.logout(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.error_code(), "USER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_current_user() {
        let fx = fixture();

        fx.service.send_code(PHONE).await.unwrap();
        let user = fx.users.find_by_phone(PHONE).await.unwrap().unwrap();

        let loaded = fx.service.current_user(user.id).await.unwrap();
        assert_eq!(loaded.phone, PHONE);

        let err = fx.service.current_user(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.error_code(), "USER_NOT_FOUND");
    }
}
