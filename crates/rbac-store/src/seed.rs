//! Seed data loaded into the directories at process start.
//!
//! The standard set holds eight permissions (CRUD over `users` and
//! `roles`), three roles built from them, and three users that each hold
//! the role with the matching id.

use chrono::{DateTime, Utc};
use rbac_core::models::permission::{Permission, PermissionAction, PermissionModule};
use rbac_core::models::role::Role;
use rbac_core::models::user::User;

/// A complete initial state for both directories.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub permissions: Vec<Permission>,
    pub roles: Vec<Role>,
    pub users: Vec<User>,
}

impl SeedData {
    /// The standard seed set, timestamped at the moment of the call.
    pub fn standard() -> Self {
        Self::standard_at(Utc::now())
    }

    pub fn standard_at(now: DateTime<Utc>) -> Self {
        let permissions = seed_permissions();
        let roles = seed_roles(&permissions, now);
        let users = seed_users(now);
        Self {
            permissions,
            roles,
            users,
        }
    }

    /// The standard permissions with no roles or users.
    pub fn permissions_only() -> Self {
        Self {
            permissions: seed_permissions(),
            ..Self::default()
        }
    }
}

fn permission(
    id: &str,
    module: PermissionModule,
    action: PermissionAction,
    description: &str,
) -> Permission {
    Permission {
        id: id.into(),
        name: Permission::compose_name(module, action),
        description: description.into(),
        module: module.as_str().into(),
    }
}

pub fn seed_permissions() -> Vec<Permission> {
    use PermissionAction::*;
    use PermissionModule::*;

    vec![
        permission("1", Users, Create, "Create users"),
        permission("2", Users, Read, "View users"),
        permission("3", Users, Update, "Update users"),
        permission("4", Users, Delete, "Delete users"),
        permission("5", Roles, Create, "Create roles"),
        permission("6", Roles, Read, "View roles"),
        permission("7", Roles, Update, "Update roles"),
        permission("8", Roles, Delete, "Delete roles"),
    ]
}

pub fn seed_roles(permissions: &[Permission], now: DateTime<Utc>) -> Vec<Role> {
    let role = |id: &str, name: &str, description: &str, permissions: Vec<Permission>| Role {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        permissions,
        created_at: now,
        updated_at: now,
    };

    let user_module = PermissionModule::Users.as_str();
    let read = PermissionAction::Read.as_str();

    vec![
        role("1", "Admin", "Full system access", permissions.to_vec()),
        role(
            "2",
            "User Manager",
            "Can manage users",
            permissions
                .iter()
                .filter(|p| p.module == user_module)
                .cloned()
                .collect(),
        ),
        role(
            "3",
            "Viewer",
            "Read-only access",
            permissions
                .iter()
                .filter(|p| p.name.contains(read))
                .cloned()
                .collect(),
        ),
    ]
}

pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    let user = |id: &str, username: &str, first_name: &str, last_name: &str| User {
        id: id.into(),
        username: username.into(),
        email: format!("{username}@example.com"),
        first_name: first_name.into(),
        last_name: last_name.into(),
        is_active: true,
        roles: vec![id.to_string()],
        created_at: now,
        updated_at: now,
    };

    vec![
        user("1", "admin", "Admin", "User"),
        user("2", "manager", "User", "Manager"),
        user("3", "viewer", "View", "Only"),
    ]
}
