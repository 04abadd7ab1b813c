//! Core business logic and domain layer for the TextAuth backend.
//!
//! This crate holds everything the HTTP surface and the infrastructure
//! implementations agree on:
//!
//! - domain entities (`OtpEntry`, `User`, token claims)
//! - the error taxonomy (`DomainError` and friends)
//! - repository and collaborator traits (`UserRepository`, `OtpStore`,
//!   `SmsSender`)
//! - the services that compose them (`OtpService`, `AuthService`,
//!   `TokenService`)
//!
//! No I/O happens here beyond what implementations injected through the
//! traits perform.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
