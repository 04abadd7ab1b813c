//! Database connection pool management.

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::{error, info};

use ta_shared::config::database::DatabaseConfig;

use crate::error::InfraError;

/// MySQL connection pool with lifecycle helpers.
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connects to MySQL according to the configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfraError> {
        info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .test_before_acquire(true)
            .connect(&config.url)
            .await
            .map_err(|err| {
                error!(error = %err, "failed to create database pool");
                InfraError::Database(err)
            })?;

        info!("database connection pool ready");
        Ok(Self { pool })
    }

    /// The underlying SQLx pool, for repositories and queries
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verifies connectivity with a trivial query.
    pub async fn health_check(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(InfraError::Database)?;
        Ok(())
    }

    /// Closes all pooled connections. Call during shutdown.
    pub async fn close(&self) {
        info!("closing database connection pool");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_with_invalid_url_fails() {
        let config = DatabaseConfig {
            url: "invalid://url".to_string(),
            max_connections: 2,
            connect_timeout: 1,
            idle_timeout: 60,
        };
        assert!(DatabasePool::connect(&config).await.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires a running MySQL instance
    async fn test_health_check_against_real_database() {
        let config = DatabaseConfig::from_env();
        let pool = DatabasePool::connect(&config).await.unwrap();
        pool.health_check().await.unwrap();
        pool.close().await;
    }
}
