//! Infrastructure layer for the TextAuth backend.
//!
//! Concrete implementations of the traits the core crate defines:
//!
//! - **cache**: the in-process passcode store with its background sweeper
//! - **sms**: Twilio delivery plus a mock provider for development
//! - **database**: MySQL persistence for users via SQLx

pub mod cache;
pub mod database;
pub mod error;
pub mod sms;

pub use error::InfraError;
