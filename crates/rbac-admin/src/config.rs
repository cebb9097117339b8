//! Admin read-model configuration.

use serde::Deserialize;

/// Configuration for the admin service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Number of most recently created users shown on the dashboard
    /// (default: 5).
    pub recent_users_limit: usize,
    /// Number of roles with the most permissions shown on the dashboard
    /// (default: 5).
    pub top_roles_limit: usize,
    /// Label used for role ids that no longer resolve to a role.
    pub unknown_role_label: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            recent_users_limit: 5,
            top_roles_limit: 5,
            unknown_role_label: "Unknown".into(),
        }
    }
}
