//! Infrastructure-level errors.
//!
//! These cover component construction and connectivity. Runtime failures
//! inside trait implementations surface through the trait's own error
//! types instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}
