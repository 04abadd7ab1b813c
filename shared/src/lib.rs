//! Shared utilities and common types for the TextAuth server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Wire-level response structures

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, OtpConfig, ServerConfig, SmsConfig,
    SmsProvider,
};
pub use types::{ErrorResponse, MessageResponse};
