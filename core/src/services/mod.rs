//! Domain services.
//!
//! Services are generic over the traits they depend on so the HTTP layer
//! can wire real infrastructure while tests inject mocks.

pub mod auth;
pub mod otp;
pub mod token;

pub use auth::AuthService;
pub use otp::OtpService;
pub use token::TokenService;
