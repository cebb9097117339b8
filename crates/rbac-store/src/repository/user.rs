//! In-memory implementation of [`UserDirectory`].
//!
//! The raw password supplied at creation is hashed with Argon2id and
//! only the hash is retained. [`User`] values handed out by the
//! directory carry no credential material.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use rbac_core::error::{RbacError, RbacResult};
use rbac_core::models::user::{CreateUser, UpdateUser, User};
use rbac_core::repository::UserDirectory;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::id::generate_unique_id;
use crate::latency::Latency;
use crate::password::{hash_password, verify_password};
use crate::seed::SeedData;

/// Stored user plus its credential hash.
#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    /// PHC-format Argon2id hash. Seeded users have none.
    password_hash: Option<String>,
}

/// Fails if `input` collides with an existing username or email.
/// Username is checked first.
fn ensure_unique(users: &IndexMap<String, UserRecord>, input: &CreateUser) -> RbacResult<()> {
    if users.values().any(|r| r.user.username == input.username) {
        warn!(username = %input.username, "Rejected user with duplicate username");
        return Err(RbacError::DuplicateUsername {
            username: input.username.clone(),
        });
    }
    if users.values().any(|r| r.user.email == input.email) {
        warn!(email = %input.email, "Rejected user with duplicate email");
        return Err(RbacError::DuplicateEmail {
            email: input.email.clone(),
        });
    }
    Ok(())
}

/// In-memory implementation of the User directory.
///
/// Clones share the same underlying collection.
#[derive(Clone)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<IndexMap<String, UserRecord>>>,
    latency: Latency,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl InMemoryUserDirectory {
    /// Build a directory seeded with [`SeedData::standard`].
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_seed(SeedData::standard(), config)
    }

    /// Build a directory from the users in `seed`.
    pub fn with_seed(seed: SeedData, config: &StoreConfig) -> Self {
        let users: IndexMap<_, _> = seed
            .users
            .into_iter()
            .map(|user| {
                (
                    user.id.clone(),
                    UserRecord {
                        user,
                        password_hash: None,
                    },
                )
            })
            .collect();

        info!(users = users.len(), "Seeded user directory");

        Self {
            users: Arc::new(RwLock::new(users)),
            latency: config.latency(),
            pepper: config.pepper.clone(),
        }
    }

    /// Check `password` against the stored hash for the user with `id`.
    ///
    /// Returns `Ok(false)` for users without a stored password (seeded
    /// users) and `NotFound` for unknown ids.
    pub async fn verify_password(&self, id: &str, password: &str) -> RbacResult<bool> {
        self.latency.wait().await;
        let hash = {
            let users = self.users.read().await;
            let record = users
                .get(id)
                .ok_or_else(|| RbacError::not_found("user", id))?;
            match &record.password_hash {
                Some(hash) => hash.clone(),
                None => return Ok(false),
            }
        };
        Ok(verify_password(password, &hash, self.pepper.as_deref())?)
    }

    /// Apply `f` to the user with `id`, refresh `updated_at`, and return
    /// the updated copy.
    async fn modify(&self, id: &str, op: &str, f: impl FnOnce(&mut User)) -> RbacResult<User> {
        let mut users = self.users.write().await;
        let Some(record) = users.get_mut(id) else {
            warn!(user_id = %id, op, "Operation targeted missing user");
            return Err(RbacError::not_found("user", id));
        };

        f(&mut record.user);
        record.user.updated_at = Utc::now();

        debug!(user_id = %id, op, "Updated user");
        Ok(record.user.clone())
    }
}

impl UserDirectory for InMemoryUserDirectory {
    async fn list(&self) -> RbacResult<Vec<User>> {
        self.latency.wait().await;
        let users = self.users.read().await;
        Ok(users.values().map(|r| r.user.clone()).collect())
    }

    async fn get_by_id(&self, id: &str) -> RbacResult<Option<User>> {
        self.latency.wait().await;
        let users = self.users.read().await;
        Ok(users.get(id).map(|r| r.user.clone()))
    }

    async fn create(&self, input: CreateUser) -> RbacResult<User> {
        self.latency.wait().await;

        // Reject obvious duplicates before paying for the hash. The
        // check is repeated under the write lock.
        ensure_unique(&*self.users.read().await, &input)?;
        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let mut users = self.users.write().await;
        ensure_unique(&users, &input)?;

        let id = generate_unique_id(|candidate| users.contains_key(candidate));
        let now = Utc::now();
        let user = User {
            id: id.clone(),
            username: input.username,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            is_active: true,
            roles: input.roles,
            created_at: now,
            updated_at: now,
        };

        users.insert(
            id,
            UserRecord {
                user: user.clone(),
                password_hash: Some(password_hash),
            },
        );
        debug!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn update(&self, id: &str, input: UpdateUser) -> RbacResult<User> {
        self.latency.wait().await;
        self.modify(id, "update", |user| {
            if let Some(first_name) = input.first_name {
                user.first_name = first_name;
            }
            if let Some(last_name) = input.last_name {
                user.last_name = last_name;
            }
            if let Some(email) = input.email {
                user.email = email;
            }
            if let Some(roles) = input.roles {
                user.roles = roles;
            }
            if let Some(is_active) = input.is_active {
                user.is_active = is_active;
            }
        })
        .await
    }

    async fn delete(&self, id: &str) -> RbacResult<()> {
        self.latency.wait().await;
        let mut users = self.users.write().await;

        if users.shift_remove(id).is_none() {
            warn!(user_id = %id, "Delete targeted missing user");
            return Err(RbacError::not_found("user", id));
        }

        debug!(user_id = %id, "Deleted user");
        Ok(())
    }

    async fn list_by_role(&self, role_id: &str) -> RbacResult<Vec<User>> {
        self.latency.wait().await;
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|r| r.user.has_role(role_id))
            .map(|r| r.user.clone())
            .collect())
    }

    async fn update_status(&self, id: &str, is_active: bool) -> RbacResult<User> {
        self.latency.wait().await;
        self.modify(id, "update_status", |user| user.is_active = is_active)
            .await
    }

    async fn assign_roles(&self, id: &str, role_ids: Vec<String>) -> RbacResult<User> {
        self.latency.wait().await;
        self.modify(id, "assign_roles", |user| user.roles = role_ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryUserDirectory {
        InMemoryUserDirectory::new(&StoreConfig::immediate())
    }

    #[tokio::test]
    async fn created_user_retains_only_a_password_hash() {
        let dir = directory();
        let user = dir
            .create(CreateUser {
                username: "carol".into(),
                email: "carol@example.com".into(),
                first_name: "Carol".into(),
                last_name: "Jones".into(),
                password: "plaintext-secret".into(),
                roles: vec![],
            })
            .await
            .unwrap();

        let users = dir.users.read().await;
        let hash = users[&user.id].password_hash.clone().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("plaintext-secret"));
    }

    #[tokio::test]
    async fn seeded_users_have_no_password_hash() {
        let dir = directory();
        let users = dir.users.read().await;
        assert!(users.values().all(|r| r.password_hash.is_none()));
    }

    fn carol() -> CreateUser {
        CreateUser {
            username: "carol".into(),
            email: "carol@example.com".into(),
            first_name: "Carol".into(),
            last_name: "Jones".into(),
            password: "plaintext-secret".into(),
            roles: vec![],
        }
    }

    #[tokio::test]
    async fn verify_password_checks_the_stored_hash() {
        let dir = InMemoryUserDirectory::new(&StoreConfig {
            latency_ms: 0,
            pepper: Some("pepper!".into()),
        });
        let user = dir.create(carol()).await.unwrap();

        assert!(dir.verify_password(&user.id, "plaintext-secret").await.unwrap());
        assert!(!dir.verify_password(&user.id, "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn verify_password_is_false_for_seeded_users() {
        let dir = directory();
        let seeded = dir.users.read().await.keys().next().cloned().unwrap();
        assert!(!dir.verify_password(&seeded, "anything").await.unwrap());
    }

    #[tokio::test]
    async fn verify_password_unknown_id_is_not_found() {
        let dir = directory();
        let err = dir.verify_password("missing", "x").await.unwrap_err();
        assert!(matches!(err, RbacError::NotFound { .. }));
    }

    #[tokio::test]
    async fn duplicate_is_rejected_without_storing_a_record() {
        let dir = directory();
        dir.create(carol()).await.unwrap();
        let before = dir.users.read().await.len();

        let err = dir
            .create(CreateUser {
                email: "other@example.com".into(),
                ..carol()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RbacError::DuplicateUsername { .. }));

        let err = dir
            .create(CreateUser {
                username: "carol2".into(),
                ..carol()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RbacError::DuplicateEmail { .. }));

        assert_eq!(dir.users.read().await.len(), before);
    }
}
