//! Domain entities for the TextAuth system.

pub mod otp;
pub mod token;
pub mod user;
