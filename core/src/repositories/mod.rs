//! Repository traits abstracting persistence.
//!
//! Implementations live in the infrastructure crate; mocks live alongside
//! the traits so service tests never touch a real database.

pub mod user;

pub use user::{MockUserRepository, UserRepository};
