//! Admin service — the aggregate views behind the dashboard, the
//! permissions overview, and the user and role tables.

use std::collections::HashMap;

use rbac_core::error::RbacResult;
use rbac_core::models::permission::Permission;
use rbac_core::models::role::Role;
use rbac_core::models::user::User;
use rbac_core::repository::{RoleDirectory, UserDirectory};
use serde::Serialize;
use tracing::debug;

use crate::config::AdminConfig;

/// Headline numbers and short lists for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: usize,
    pub active_users: usize,
    pub total_roles: usize,
    pub total_permissions: usize,
    /// Active users as a rounded percentage of all users; 0 with no users.
    pub activation_rate: u32,
    /// Newest first.
    pub recent_users: Vec<User>,
    /// Most permissions first.
    pub top_roles: Vec<Role>,
}

/// Permissions of a single module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleGroup {
    pub module: String,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionOverview {
    pub total: usize,
    /// In the order each module first appears.
    pub modules: Vec<ModuleGroup>,
}

/// A user with its role ids resolved to names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub user: User,
    pub role_names: Vec<String>,
}

/// A role with its permission names and the number of users holding it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRow {
    pub role: Role,
    pub permission_names: Vec<String>,
    pub member_count: usize,
}

/// Admin service.
///
/// Generic over directory implementations so that the read models
/// have no dependency on the storage crate.
pub struct AdminService<U: UserDirectory, R: RoleDirectory> {
    users: U,
    roles: R,
    config: AdminConfig,
}

impl<U: UserDirectory, R: RoleDirectory> AdminService<U, R> {
    pub fn new(users: U, roles: R, config: AdminConfig) -> Self {
        Self {
            users,
            roles,
            config,
        }
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn roles(&self) -> &R {
        &self.roles
    }

    pub async fn dashboard(&self) -> RbacResult<DashboardSummary> {
        let users = self.users.list().await?;
        let roles = self.roles.list().await?;
        let permissions = self.roles.list_permissions().await?;

        let total_users = users.len();
        let active_users = users.iter().filter(|u| u.is_active).count();

        let mut recent_users = users;
        recent_users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_users.truncate(self.config.recent_users_limit);

        let total_roles = roles.len();
        let mut top_roles = roles;
        top_roles.sort_by(|a, b| b.permissions.len().cmp(&a.permissions.len()));
        top_roles.truncate(self.config.top_roles_limit);

        debug!(total_users, active_users, total_roles, "Computed dashboard");

        Ok(DashboardSummary {
            total_users,
            active_users,
            total_roles,
            total_permissions: permissions.len(),
            activation_rate: activation_rate(active_users, total_users),
            recent_users,
            top_roles,
        })
    }

    pub async fn permission_overview(&self) -> RbacResult<PermissionOverview> {
        let permissions = self.roles.list_permissions().await?;
        let total = permissions.len();
        Ok(PermissionOverview {
            total,
            modules: group_by_module(permissions),
        })
    }

    /// All users with role names joined in. Role ids that no longer
    /// resolve are shown with the configured unknown label.
    pub async fn user_rows(&self) -> RbacResult<Vec<UserRow>> {
        let users = self.users.list().await?;
        let roles = self.roles.list().await?;
        let names: HashMap<&str, &str> = roles
            .iter()
            .map(|r| (r.id.as_str(), r.name.as_str()))
            .collect();

        Ok(users
            .into_iter()
            .map(|user| {
                let role_names = user
                    .roles
                    .iter()
                    .map(|id| {
                        names
                            .get(id.as_str())
                            .copied()
                            .unwrap_or(self.config.unknown_role_label.as_str())
                            .to_string()
                    })
                    .collect();
                UserRow { user, role_names }
            })
            .collect())
    }

    pub async fn role_rows(&self) -> RbacResult<Vec<RoleRow>> {
        let roles = self.roles.list().await?;
        let users = self.users.list().await?;

        Ok(roles
            .into_iter()
            .map(|role| {
                let member_count = users.iter().filter(|u| u.has_role(&role.id)).count();
                let permission_names = role.permissions.iter().map(|p| p.name.clone()).collect();
                RoleRow {
                    role,
                    permission_names,
                    member_count,
                }
            })
            .collect())
    }
}

fn activation_rate(active: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((active as f64 / total as f64) * 100.0).round() as u32
}

fn group_by_module(permissions: Vec<Permission>) -> Vec<ModuleGroup> {
    let mut groups: Vec<ModuleGroup> = Vec::new();
    for permission in permissions {
        match groups.iter_mut().find(|g| g.module == permission.module) {
            Some(group) => group.permissions.push(permission),
            None => groups.push(ModuleGroup {
                module: permission.module.clone(),
                permissions: vec![permission],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(id: &str, module: &str) -> Permission {
        Permission {
            id: id.into(),
            name: format!("{module}:read"),
            description: String::new(),
            module: module.into(),
        }
    }

    #[test]
    fn activation_rate_rounds_to_nearest_percent() {
        assert_eq!(activation_rate(0, 0), 0);
        assert_eq!(activation_rate(2, 3), 67);
        assert_eq!(activation_rate(1, 3), 33);
        assert_eq!(activation_rate(1, 8), 13);
        assert_eq!(activation_rate(4, 4), 100);
    }

    #[test]
    fn grouping_keeps_first_seen_module_order() {
        let groups = group_by_module(vec![
            permission("1", "roles"),
            permission("2", "users"),
            permission("3", "roles"),
        ]);
        let modules: Vec<_> = groups.iter().map(|g| g.module.as_str()).collect();
        assert_eq!(modules, ["roles", "users"]);
        assert_eq!(groups[0].permissions.len(), 2);
    }
}
