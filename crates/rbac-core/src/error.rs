//! Error types for the RBAC directories.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RbacError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Role name already exists: {name}")]
    DuplicateName { name: String },

    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("Email already exists: {email}")]
    DuplicateEmail { email: String },

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

impl RbacError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

pub type RbacResult<T> = Result<T, RbacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = RbacError::not_found("role", "abc123");
        assert_eq!(err.to_string(), "Entity not found: role with id abc123");
    }

    #[test]
    fn duplicate_messages_carry_the_value() {
        let err = RbacError::DuplicateEmail {
            email: "a@example.com".into(),
        };
        assert_eq!(err.to_string(), "Email already exists: a@example.com");
    }
}
