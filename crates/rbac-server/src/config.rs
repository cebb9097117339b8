//! Application configuration: defaults, then an optional TOML file,
//! then environment variable overrides.

use std::env;
use std::path::{Path, PathBuf};

use rbac_admin::AdminConfig;
use rbac_store::StoreConfig;
use serde::Deserialize;
use tracing::{info, warn};

/// Standard config file search paths.
const CONFIG_PATHS: &[&str] = &["rbac.toml", "./config/rbac.toml"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "rbac=info".into(),
            json: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub admin: AdminConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }
}

/// An environment override whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub key: &'static str,
    pub value: String,
}

/// Loaded configuration plus what the loader did to produce it.
///
/// The loader runs before tracing is initialised, so the report is
/// logged by the caller through [`LoadedConfig::log_report`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// The file the configuration was read from, if any.
    pub source: Option<PathBuf>,
    pub rejected: Vec<RejectedOverride>,
}

impl LoadedConfig {
    pub fn log_report(&self) {
        match &self.source {
            Some(path) => info!(?path, "Loaded configuration from file"),
            None => info!("No configuration file found, using defaults"),
        }
        for rejected in &self.rejected {
            warn!(
                key = rejected.key,
                value = %rejected.value,
                "Ignoring invalid environment override"
            );
        }
    }
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with a specific config file path. The file must
    /// exist; a missing file is a [`ConfigError::Read`].
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment
    /// variable overrides applied on top.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    fn load_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        let source = self.find_config_file(&lookup);
        let mut config = match &source {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        let rejected = apply_overrides(&mut config, &lookup);
        Ok(LoadedConfig {
            config,
            source,
            rejected,
        })
    }

    /// An explicit path (constructor or `RBAC_CONFIG`) is returned as-is
    /// so that a missing file surfaces as an error. Only the standard
    /// search paths are checked for existence.
    fn find_config_file(&self, lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }

        if let Some(path) = lookup("RBAC_CONFIG") {
            return Some(PathBuf::from(path));
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

/// Apply `RBAC_*` overrides using `lookup` to read variables. Returns
/// the overrides whose values failed to parse; those keep the previous
/// value.
fn apply_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<RejectedOverride> {
    let mut rejected = Vec::new();

    if let Some(val) = lookup("RBAC_LATENCY_MS") {
        match val.parse() {
            Ok(ms) => config.store.latency_ms = ms,
            Err(_) => rejected.push(RejectedOverride {
                key: "RBAC_LATENCY_MS",
                value: val,
            }),
        }
    }
    if let Some(val) = lookup("RBAC_PASSWORD_PEPPER") {
        config.store.pepper = Some(val);
    }
    if let Some(val) = lookup("RBAC_LOG_FILTER") {
        config.log.filter = val;
    }
    if let Some(val) = lookup("RBAC_LOG_JSON") {
        match val.parse() {
            Ok(json) => config.log.json = json,
            Err(_) => rejected.push(RejectedOverride {
                key: "RBAC_LOG_JSON",
                value: val,
            }),
        }
    }

    rejected
}
