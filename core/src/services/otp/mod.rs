//! One-time passcode issuance and validation.
//!
//! The service owns code generation and the issue/verify flows; storage and
//! SMS delivery are injected through the traits in [`traits`].

pub mod generator;
pub mod service;
pub mod traits;
pub mod types;

pub use generator::CodeGenerator;
pub use service::OtpService;
pub use traits::{OtpStore, OtpStoreError, SmsError, SmsSender};
pub use types::{SendCodeResult, VerifyOutcome};
