//! SMS delivery providers.
//!
//! Both providers implement the core `SmsSender` trait: Twilio for real
//! traffic, the mock for development and tests. Which one runs is chosen
//! at startup from `SmsConfig`.

pub mod mock;
pub mod twilio;

pub use mock::MockSmsSender;
pub use twilio::TwilioSmsSender;

/// Body of the verification message sent for every issued code
pub(crate) fn verification_message(code: &str) -> String {
    format!("Your TextAuth verification code is: {code}. It expires in 5 minutes.")
}
