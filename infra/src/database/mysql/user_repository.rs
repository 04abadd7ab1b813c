//! MySQL implementation of the user repository.
//!
//! Expects a `users` table with `id` stored as a 36-character UUID string,
//! `phone` unique, and nullable `refresh_token_hash` / `last_login_at`
//! columns.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ta_core::domain::entities::user::User;
use ta_core::errors::{DomainError, DomainResult};
use ta_core::repositories::UserRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, phone, is_verified, refresh_token_hash,
           created_at, updated_at, last_login_at
    FROM users
"#;

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> DomainResult<User> {
        let id: String = row.try_get("id").map_err(db_err)?;
        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|err| DomainError::internal(format!("invalid user id in row: {err}")))?,
            phone: row.try_get("phone").map_err(db_err)?,
            is_verified: row.try_get("is_verified").map_err(db_err)?,
            refresh_token_hash: row.try_get("refresh_token_hash").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
            updated_at: row.try_get("updated_at").map_err(db_err)?,
            last_login_at: row.try_get("last_login_at").map_err(db_err)?,
        })
    }
}

fn db_err(err: sqlx::Error) -> DomainError {
    DomainError::internal(format!("database: {err}"))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        let query = format!("{SELECT_COLUMNS} WHERE phone = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    async fn find_by_refresh_token_hash(&self, hash: &str) -> DomainResult<Option<User>> {
        let query = format!("{SELECT_COLUMNS} WHERE refresh_token_hash = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    async fn create(&self, user: &User) -> DomainResult<()> {
        let query = r#"
            INSERT INTO users (
                id, phone, is_verified, refresh_token_hash,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone)
            .bind(user.is_verified)
            .bind(&user.refresh_token_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        let query = r#"
            UPDATE users SET
                phone = ?,
                is_verified = ?,
                refresh_token_hash = ?,
                updated_at = ?,
                last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.phone)
            .bind(user.is_verified)
            .bind(&user.refresh_token_hash)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(())
    }

    async fn exists_by_phone(&self, phone: &str) -> DomainResult<bool> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE phone = ?) AS user_exists";

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let exists: i8 = row.try_get("user_exists").map_err(db_err)?;
        Ok(exists == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_shared::config::database::DatabaseConfig;

    use crate::database::connection::DatabasePool;

    async fn test_repository() -> MySqlUserRepository {
        let config = DatabaseConfig::from_env();
        let pool = DatabasePool::connect(&config).await.unwrap();
        MySqlUserRepository::new(pool.pool().clone())
    }

    fn unique_phone() -> String {
        format!("+1555{}", &Uuid::new_v4().simple().to_string()[..7])
    }

    #[tokio::test]
    #[ignore] // Requires a running MySQL instance with the users table
    async fn test_create_and_find_round_trip() {
        let repo = test_repository().await;
        let user = User::new(unique_phone());

        repo.create(&user).await.unwrap();

        let found = repo.find_by_phone(&user.phone).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(!found.is_verified);
        assert!(repo.exists_by_phone(&user.phone).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires a running MySQL instance with the users table
    async fn test_update_persists_refresh_token_hash() {
        let repo = test_repository().await;
        let mut user = User::new(unique_phone());
        repo.create(&user).await.unwrap();

        user.verify();
        user.rotate_refresh_token("a".repeat(64));
        repo.update(&user).await.unwrap();

        let found = repo
            .find_by_refresh_token_hash(&"a".repeat(64))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert!(found.is_verified);
    }

    #[tokio::test]
    #[ignore] // Requires a running MySQL instance with the users table
    async fn test_update_missing_user_is_not_found() {
        let repo = test_repository().await;
        let user = User::new(unique_phone());
        let err = repo.update(&user).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
