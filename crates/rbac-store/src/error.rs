//! Store-specific error types and conversions.

use rbac_core::error::RbacError;

/// Storage-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("password hash error: {0}")]
    PasswordHash(String),
}

impl From<StoreError> for RbacError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PasswordHash(msg) => RbacError::Crypto(msg),
        }
    }
}
