//! HTTP API layer for TextAuth.
//!
//! Exposes passwordless phone login over a small REST surface: request a
//! verification code, exchange it for a JWT access token plus rotating
//! refresh token, and manage the resulting session. Business rules live
//! in `ta_core`; this crate only does transport, validation and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
