//! Directory trait definitions.
//!
//! All directory operations are async. Lookups by id return `Option`;
//! mutations that target a missing id fail with [`RbacError::NotFound`].
//!
//! [`RbacError::NotFound`]: crate::error::RbacError::NotFound

use crate::error::RbacResult;
use crate::models::{
    permission::Permission,
    role::{CreateRole, Role, UpdateRole},
    user::{CreateUser, UpdateUser, User},
};

// ---------------------------------------------------------------------------
// Roles & permissions
// ---------------------------------------------------------------------------

pub trait RoleDirectory: Send + Sync {
    /// Snapshot of all roles in insertion order.
    fn list(&self) -> impl Future<Output = RbacResult<Vec<Role>>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = RbacResult<Option<Role>>> + Send;
    /// Fails with `DuplicateName` if a role with the same name exists.
    fn create(&self, input: CreateRole) -> impl Future<Output = RbacResult<Role>> + Send;
    /// Renames are not checked for uniqueness.
    fn update(
        &self,
        id: &str,
        input: UpdateRole,
    ) -> impl Future<Output = RbacResult<Role>> + Send;
    /// Users holding this role id are left untouched.
    fn delete(&self, id: &str) -> impl Future<Output = RbacResult<()>> + Send;

    fn list_permissions(&self) -> impl Future<Output = RbacResult<Vec<Permission>>> + Send;
    /// Exact, case-sensitive match on `Permission::module`.
    fn list_permissions_by_module(
        &self,
        module: &str,
    ) -> impl Future<Output = RbacResult<Vec<Permission>>> + Send;
    fn list_permissions_by_role(
        &self,
        role_id: &str,
    ) -> impl Future<Output = RbacResult<Vec<Permission>>> + Send;
    /// Replace the role's permission set with the resolved `permission_ids`.
    fn assign_permissions(
        &self,
        role_id: &str,
        permission_ids: Vec<String>,
    ) -> impl Future<Output = RbacResult<Role>> + Send;
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub trait UserDirectory: Send + Sync {
    fn list(&self) -> impl Future<Output = RbacResult<Vec<User>>> + Send;
    fn get_by_id(&self, id: &str) -> impl Future<Output = RbacResult<Option<User>>> + Send;
    /// Username is checked before email; new users are always active.
    fn create(&self, input: CreateUser) -> impl Future<Output = RbacResult<User>> + Send;
    fn update(
        &self,
        id: &str,
        input: UpdateUser,
    ) -> impl Future<Output = RbacResult<User>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = RbacResult<()>> + Send;
    /// Users whose `roles` contain `role_id` exactly.
    fn list_by_role(&self, role_id: &str) -> impl Future<Output = RbacResult<Vec<User>>> + Send;
    fn update_status(
        &self,
        id: &str,
        is_active: bool,
    ) -> impl Future<Output = RbacResult<User>> + Send;
    /// Replace the user's role ids verbatim. Ids are not validated.
    fn assign_roles(
        &self,
        id: &str,
        role_ids: Vec<String>,
    ) -> impl Future<Output = RbacResult<User>> + Send;
}
