//! Passwordless authentication flows built on passcodes and tokens.

pub mod service;

pub use service::AuthService;
