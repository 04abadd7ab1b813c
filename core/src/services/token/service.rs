//! Token issuance and verification.
//!
//! Access tokens are HS256 JWTs. Refresh tokens are opaque random strings;
//! only their SHA-256 hash is ever persisted, so a database leak does not
//! leak usable tokens.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use ta_shared::config::auth::JwtConfig;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainResult, TokenError};

/// Length of a generated refresh token in characters
const REFRESH_TOKEN_LENGTH: usize = 32;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Issues and verifies tokens according to a [`JwtConfig`].
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a signed access token for the given user
    pub fn issue_access_token(&self, user_id: Uuid) -> DomainResult<String> {
        let claims = Claims::new_access_token(
            user_id,
            self.config.access_token_expiry,
            &self.config.issuer,
        );
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    /// Verify an access token and return its claims.
    ///
    /// Expiry and immaturity are reported as distinct errors so the HTTP
    /// layer can tell a stale session apart from a malformed token.
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                let token_error = match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        TokenError::TokenNotYetValid
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => TokenError::InvalidClaims,
                    _ => TokenError::InvalidTokenFormat,
                };
                token_error.into()
            })
    }

    /// Generate a fresh opaque refresh token and the hash to persist.
    ///
    /// Returns `(raw_token, hash)`; the raw value goes to the client, the
    /// hash to the user row.
    pub fn generate_refresh_token(&self) -> (String, String) {
        let mut rng = rand::thread_rng();
        let raw: String = (0..REFRESH_TOKEN_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..ALPHANUMERIC.len());
                ALPHANUMERIC[idx] as char
            })
            .collect();
        let hash = Self::hash_token(&raw);
        (raw, hash)
    }

    /// Issue a full access + refresh pair for the given user
    pub fn issue_token_pair(&self, user_id: Uuid) -> DomainResult<(TokenPair, String)> {
        let access_token = self.issue_access_token(user_id)?;
        let (refresh_token, refresh_hash) = self.generate_refresh_token();
        let pair = TokenPair::new(access_token, refresh_token, self.config.access_token_expiry);
        Ok((pair, refresh_hash))
    }

    /// SHA-256 hash of a token, hex encoded
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }
}
