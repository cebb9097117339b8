//! Permission domain model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    /// Conventionally `<module>:<action>`, e.g. `users:create`.
    pub name: String,
    pub description: String,
    pub module: String,
}

impl Permission {
    /// Build a permission name from its module and action.
    pub fn compose_name(module: PermissionModule, action: PermissionAction) -> String {
        format!("{module}:{action}")
    }

    /// The action segment of `name`, if it follows the `module:action`
    /// convention and the action is a known one.
    pub fn action(&self) -> Option<PermissionAction> {
        let (_, action) = self.name.split_once(':')?;
        action.parse().ok()
    }
}

/// Predefined permission modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionModule {
    Users,
    Roles,
    Settings,
    Reports,
}

impl PermissionModule {
    pub const ALL: [PermissionModule; 4] = [
        PermissionModule::Users,
        PermissionModule::Roles,
        PermissionModule::Settings,
        PermissionModule::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionModule::Users => "users",
            PermissionModule::Roles => "roles",
            PermissionModule::Settings => "settings",
            PermissionModule::Reports => "reports",
        }
    }
}

impl fmt::Display for PermissionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionModule {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Predefined permission actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl PermissionAction {
    pub const ALL: [PermissionAction; 5] = [
        PermissionAction::Create,
        PermissionAction::Read,
        PermissionAction::Update,
        PermissionAction::Delete,
        PermissionAction::Manage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::Create => "create",
            PermissionAction::Read => "read",
            PermissionAction::Update => "update",
            PermissionAction::Delete => "delete",
            PermissionAction::Manage => "manage",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when parsing a module or action name that is not predefined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0}")]
pub struct UnknownVariant(pub String);
