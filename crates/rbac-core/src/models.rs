//! Domain models for the RBAC console.
//!
//! Field names serialize in camelCase so a presentation layer sees
//! `firstName`, `isActive`, `createdAt`, and so on.

pub mod permission;
pub mod role;
pub mod user;
