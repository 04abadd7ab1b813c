//! MySQL persistence via SQLx.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::MySqlUserRepository;
