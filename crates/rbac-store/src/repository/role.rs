//! In-memory implementation of [`RoleDirectory`].

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use rbac_core::error::{RbacError, RbacResult};
use rbac_core::models::permission::Permission;
use rbac_core::models::role::{CreateRole, Role, UpdateRole};
use rbac_core::repository::RoleDirectory;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::id::generate_unique_id;
use crate::latency::Latency;
use crate::seed::SeedData;

#[derive(Debug, Default)]
struct RoleState {
    roles: IndexMap<String, Role>,
    /// Seeded once; no operation adds or edits permissions.
    permissions: IndexMap<String, Permission>,
}

impl RoleState {
    /// Copies of the permissions whose id appears in `ids`, in
    /// collection order. Unknown ids are dropped.
    fn resolve(&self, ids: &[String]) -> Vec<Permission> {
        self.permissions
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect()
    }
}

/// In-memory implementation of the Role directory.
///
/// Clones share the same underlying collections.
#[derive(Clone)]
pub struct InMemoryRoleDirectory {
    state: Arc<RwLock<RoleState>>,
    latency: Latency,
}

impl InMemoryRoleDirectory {
    /// Build a directory seeded with [`SeedData::standard`].
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_seed(SeedData::standard(), config)
    }

    /// Build a directory from the roles and permissions in `seed`.
    pub fn with_seed(seed: SeedData, config: &StoreConfig) -> Self {
        let permissions: IndexMap<_, _> = seed
            .permissions
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        let roles: IndexMap<_, _> = seed
            .roles
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();

        info!(
            roles = roles.len(),
            permissions = permissions.len(),
            "Seeded role directory"
        );

        Self {
            state: Arc::new(RwLock::new(RoleState { roles, permissions })),
            latency: config.latency(),
        }
    }
}

impl RoleDirectory for InMemoryRoleDirectory {
    async fn list(&self) -> RbacResult<Vec<Role>> {
        self.latency.wait().await;
        let state = self.state.read().await;
        Ok(state.roles.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> RbacResult<Option<Role>> {
        self.latency.wait().await;
        let state = self.state.read().await;
        Ok(state.roles.get(id).cloned())
    }

    async fn create(&self, input: CreateRole) -> RbacResult<Role> {
        self.latency.wait().await;
        let mut state = self.state.write().await;

        if state.roles.values().any(|r| r.name == input.name) {
            warn!(name = %input.name, "Rejected role with duplicate name");
            return Err(RbacError::DuplicateName { name: input.name });
        }

        let permissions = state.resolve(&input.permission_ids);
        let id = generate_unique_id(|candidate| state.roles.contains_key(candidate));
        let now = Utc::now();
        let role = Role {
            id: id.clone(),
            name: input.name,
            description: input.description,
            permissions,
            created_at: now,
            updated_at: now,
        };

        state.roles.insert(id, role.clone());
        debug!(role_id = %role.id, name = %role.name, "Created role");
        Ok(role)
    }

    async fn update(&self, id: &str, input: UpdateRole) -> RbacResult<Role> {
        self.latency.wait().await;
        let mut state = self.state.write().await;

        let permissions = input.permission_ids.map(|ids| state.resolve(&ids));
        let Some(role) = state.roles.get_mut(id) else {
            warn!(role_id = %id, "Update targeted missing role");
            return Err(RbacError::not_found("role", id));
        };

        if let Some(name) = input.name {
            role.name = name;
        }
        if let Some(description) = input.description {
            role.description = description;
        }
        if let Some(permissions) = permissions {
            role.permissions = permissions;
        }
        role.updated_at = Utc::now();

        debug!(role_id = %id, "Updated role");
        Ok(role.clone())
    }

    async fn delete(&self, id: &str) -> RbacResult<()> {
        self.latency.wait().await;
        let mut state = self.state.write().await;

        if state.roles.shift_remove(id).is_none() {
            warn!(role_id = %id, "Delete targeted missing role");
            return Err(RbacError::not_found("role", id));
        }

        debug!(role_id = %id, "Deleted role");
        Ok(())
    }

    async fn list_permissions(&self) -> RbacResult<Vec<Permission>> {
        self.latency.wait().await;
        let state = self.state.read().await;
        Ok(state.permissions.values().cloned().collect())
    }

    async fn list_permissions_by_module(&self, module: &str) -> RbacResult<Vec<Permission>> {
        self.latency.wait().await;
        let state = self.state.read().await;
        Ok(state
            .permissions
            .values()
            .filter(|p| p.module == module)
            .cloned()
            .collect())
    }

    async fn list_permissions_by_role(&self, role_id: &str) -> RbacResult<Vec<Permission>> {
        self.latency.wait().await;
        let state = self.state.read().await;
        state
            .roles
            .get(role_id)
            .map(|role| role.permissions.clone())
            .ok_or_else(|| RbacError::not_found("role", role_id))
    }

    async fn assign_permissions(
        &self,
        role_id: &str,
        permission_ids: Vec<String>,
    ) -> RbacResult<Role> {
        self.latency.wait().await;
        let mut state = self.state.write().await;

        let permissions = state.resolve(&permission_ids);
        let Some(role) = state.roles.get_mut(role_id) else {
            warn!(role_id = %role_id, "Permission assignment targeted missing role");
            return Err(RbacError::not_found("role", role_id));
        };

        role.permissions = permissions;
        role.updated_at = Utc::now();

        debug!(
            role_id = %role_id,
            permissions = role.permissions.len(),
            "Assigned permissions to role"
        );
        Ok(role.clone())
    }
}
