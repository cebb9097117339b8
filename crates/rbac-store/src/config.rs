//! Store configuration.

use std::fmt;

use serde::Deserialize;

use crate::latency::Latency;

/// Configuration for the in-memory directories.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Simulated latency applied to every directory call, in
    /// milliseconds (default: 500). Zero disables the delay.
    pub latency_ms: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("latency_ms", &self.latency_ms)
            .field("pepper", &self.pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: 500,
            pepper: None,
        }
    }
}

impl StoreConfig {
    /// A configuration with no simulated latency, for tests.
    pub fn immediate() -> Self {
        Self {
            latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn latency(&self) -> Latency {
        Latency::from_millis(self.latency_ms)
    }
}
