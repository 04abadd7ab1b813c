//! JWT access tokens and opaque refresh tokens.

pub mod service;

pub use service::TokenService;
