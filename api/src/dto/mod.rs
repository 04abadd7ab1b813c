//! Request and response payloads for the HTTP API

pub mod auth;

pub use auth::{
    RefreshTokenRequest, SendCodeRequest, SendCodeResponse, SessionResponse, VerifyCodeRequest,
};
