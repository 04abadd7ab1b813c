//! Common type definitions shared across crates

pub mod response;

pub use response::{ErrorResponse, MessageResponse};
