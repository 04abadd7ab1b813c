//! In-process storage for active verification codes.

pub mod memory;

pub use memory::MemoryOtpStore;
