//! User repository abstraction and test double.

pub mod mock;
pub mod repository;

pub use mock::MockUserRepository;
pub use repository::UserRepository;
