//! RBAC Store — in-memory role and user directories.
//!
//! This crate provides:
//! - Directory implementations ([`InMemoryRoleDirectory`], [`InMemoryUserDirectory`])
//! - The initial data set ([`SeedData`])
//! - Simulated call latency ([`Latency`]) and its configuration ([`StoreConfig`])
//! - Random identifier generation ([`generate_id`])

mod config;
mod error;
mod id;
mod latency;
mod password;
pub mod repository;
mod seed;

pub use config::StoreConfig;
pub use error::StoreError;
pub use id::{generate_id, generate_unique_id};
pub use latency::Latency;
pub use repository::{InMemoryRoleDirectory, InMemoryUserDirectory};
pub use seed::{SeedData, seed_permissions, seed_roles, seed_users};
