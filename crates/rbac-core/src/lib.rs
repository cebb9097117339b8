//! RBAC Core — domain models, error types, and the async directory
//! traits shared by the storage and admin crates.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{RbacError, RbacResult};
pub use repository::{RoleDirectory, UserDirectory};
