//! RBAC Admin — read models for the dashboard, permissions overview,
//! and user/role tables.

pub mod config;
pub mod service;

pub use config::AdminConfig;
pub use service::{
    AdminService, DashboardSummary, ModuleGroup, PermissionOverview, RoleRow, UserRow,
};
