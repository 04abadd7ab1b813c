//! In-memory user repository for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};

use super::repository::UserRepository;

/// In-memory [`UserRepository`] backed by a `HashMap`.
///
/// Cloning shares the underlying map, so a test can hold its own handle
/// while the service under test holds another.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail_next: Arc<RwLock<bool>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Make the next repository call fail with an internal error
    pub async fn fail_next_call(&self) {
        *self.fail_next.write().await = true;
    }

    async fn check_failure(&self) -> DomainResult<()> {
        let mut fail = self.fail_next.write().await;
        if *fail {
            *fail = false;
            return Err(DomainError::internal("simulated repository failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_refresh_token_hash(&self, hash: &str) -> DomainResult<Option<User>> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.refresh_token_hash.as_deref() == Some(hash))
            .cloned())
    }

    async fn create(&self, user: &User) -> DomainResult<()> {
        self.check_failure().await?;
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        self.check_failure().await?;
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn exists_by_phone(&self, phone: &str) -> DomainResult<bool> {
        self.check_failure().await?;
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.phone == phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_by_phone() {
        let repo = MockUserRepository::new();
        let user = User::new("+15551234567".to_string());
        repo.create(&user).await.unwrap();

        let found = repo.find_by_phone("+15551234567").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(repo.exists_by_phone("+15551234567").await.unwrap());
        assert!(!repo.exists_by_phone("+15559999999").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let repo = MockUserRepository::new();
        let user = User::new("+15551234567".to_string());
        let err = repo.update(&user).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_find_by_refresh_token_hash() {
        let repo = MockUserRepository::new();
        let mut user = User::new("+15551234567".to_string());
        user.rotate_refresh_token("abc123".to_string());
        repo.create(&user).await.unwrap();

        let found = repo.find_by_refresh_token_hash("abc123").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(repo
            .find_by_refresh_token_hash("missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_fail_next_call_fails_once() {
        let repo = MockUserRepository::new();
        repo.fail_next_call().await;
        assert!(repo.find_by_phone("+1555").await.is_err());
        assert!(repo.find_by_phone("+1555").await.is_ok());
    }
}
