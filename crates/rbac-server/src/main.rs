//! RBAC Server — application entry point.
//!
//! Seeds the role and user directories once at start-up and holds them
//! for the life of the process. State is not persisted across restarts.

mod config;

use rbac_admin::AdminService;
use rbac_store::{InMemoryRoleDirectory, InMemoryUserDirectory};
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigLoader, LogConfig};

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log.filter));

    if log.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // An optional first argument names the config file.
    let loader = match std::env::args().nth(1) {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let loaded = loader.load()?;
    init_tracing(&loaded.config.log);
    loaded.log_report();
    let config = loaded.config;

    tracing::info!(
        latency_ms = config.store.latency_ms,
        "Starting RBAC server..."
    );

    let roles = InMemoryRoleDirectory::new(&config.store);
    let users = InMemoryUserDirectory::new(&config.store);
    let admin = AdminService::new(users, roles, config.admin.clone());

    let summary = admin.dashboard().await?;
    tracing::info!(
        users = summary.total_users,
        active_users = summary.active_users,
        roles = summary.total_roles,
        permissions = summary.total_permissions,
        "Directories ready"
    );

    tokio::signal::ctrl_c().await?;

    tracing::info!("RBAC server stopped.");
    Ok(())
}
