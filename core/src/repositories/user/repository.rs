//! User repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Persistence operations for users.
///
/// Phone numbers are stored in E.164 format; lookups expect the caller to
/// have normalized the number first.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by phone number
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find the user holding the given refresh token hash
    async fn find_by_refresh_token_hash(&self, hash: &str) -> DomainResult<Option<User>>;

    /// Persist a new user
    async fn create(&self, user: &User) -> DomainResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> DomainResult<()>;

    /// Check whether a user exists for the given phone number
    async fn exists_by_phone(&self, phone: &str) -> DomainResult<bool>;
}
