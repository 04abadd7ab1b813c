//! Shared utility functions

pub mod phone;

pub use phone::{mask_phone_number, normalize_phone_number};
