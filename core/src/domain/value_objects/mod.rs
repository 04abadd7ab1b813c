//! Value objects used across service boundaries.

pub mod auth_response;

pub use auth_response::AuthResponse;
