//! In-memory directory implementations.

mod role;
mod user;

pub use role::InMemoryRoleDirectory;
pub use user::InMemoryUserDirectory;
