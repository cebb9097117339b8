//! Integration tests for the admin read models.

use chrono::Duration;
use rbac_admin::{AdminConfig, AdminService};
use rbac_core::models::role::CreateRole;
use rbac_core::models::user::CreateUser;
use rbac_core::repository::{RoleDirectory, UserDirectory};
use rbac_store::{InMemoryRoleDirectory, InMemoryUserDirectory, SeedData, StoreConfig};

fn setup() -> AdminService<InMemoryUserDirectory, InMemoryRoleDirectory> {
    let config = StoreConfig::immediate();
    AdminService::new(
        InMemoryUserDirectory::new(&config),
        InMemoryRoleDirectory::new(&config),
        AdminConfig::default(),
    )
}

fn new_user(username: &str, roles: &[&str]) -> CreateUser {
    CreateUser {
        username: username.into(),
        email: format!("{username}@example.org"),
        first_name: username.into(),
        last_name: "Test".into(),
        password: "pw".into(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_reflects_seed_state() {
    let svc = setup();
    let summary = svc.dashboard().await.unwrap();

    assert_eq!(summary.total_users, 3);
    assert_eq!(summary.active_users, 3);
    assert_eq!(summary.total_roles, 3);
    assert_eq!(summary.total_permissions, 8);
    assert_eq!(summary.activation_rate, 100);

    let top: Vec<_> = summary.top_roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(top, ["Admin", "User Manager", "Viewer"]);
}

#[tokio::test]
async fn dashboard_counts_inactive_users() {
    let svc = setup();
    svc.users().update_status("3", false).await.unwrap();

    let summary = svc.dashboard().await.unwrap();
    assert_eq!(summary.active_users, 2);
    assert_eq!(summary.activation_rate, 67);
}

#[tokio::test]
async fn dashboard_recent_users_are_newest_first_and_limited() {
    let config = StoreConfig::immediate();
    let mut seed = SeedData::standard();
    // Spread the seeded users out so ordering is deterministic.
    for (i, user) in seed.users.iter_mut().enumerate() {
        user.created_at -= Duration::hours(10 - i as i64);
    }
    let svc = AdminService::new(
        InMemoryUserDirectory::with_seed(seed.clone(), &config),
        InMemoryRoleDirectory::with_seed(seed, &config),
        AdminConfig {
            recent_users_limit: 2,
            ..AdminConfig::default()
        },
    );

    let fresh = svc.users().create(new_user("fresh", &[])).await.unwrap();

    let summary = svc.dashboard().await.unwrap();
    let recent: Vec<_> = summary
        .recent_users
        .iter()
        .map(|u| u.username.as_str())
        .collect();
    assert_eq!(recent, [fresh.username.as_str(), "viewer"]);
    assert_eq!(summary.total_users, 4);
}

#[tokio::test]
async fn dashboard_with_no_users_has_zero_activation_rate() {
    let config = StoreConfig::immediate();
    let svc = AdminService::new(
        InMemoryUserDirectory::with_seed(SeedData::permissions_only(), &config),
        InMemoryRoleDirectory::with_seed(SeedData::permissions_only(), &config),
        AdminConfig::default(),
    );

    let summary = svc.dashboard().await.unwrap();
    assert_eq!(summary.total_users, 0);
    assert_eq!(summary.activation_rate, 0);
    assert!(summary.recent_users.is_empty());
    assert!(summary.top_roles.is_empty());
    assert_eq!(summary.total_permissions, 8);
}

// ---------------------------------------------------------------------------
// Permissions overview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn permission_overview_groups_by_module() {
    let svc = setup();
    let overview = svc.permission_overview().await.unwrap();

    assert_eq!(overview.total, 8);
    let modules: Vec<_> = overview.modules.iter().map(|g| g.module.as_str()).collect();
    assert_eq!(modules, ["users", "roles"]);
    assert!(
        overview
            .modules
            .iter()
            .all(|g| g.permissions.len() == 4 && g.permissions.iter().all(|p| p.module == g.module))
    );
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_rows_join_role_names() {
    let svc = setup();
    let rows = svc.user_rows().await.unwrap();

    let names: Vec<_> = rows.iter().map(|r| r.role_names.clone()).collect();
    assert_eq!(
        names,
        [vec!["Admin"], vec!["User Manager"], vec!["Viewer"]]
    );
}

#[tokio::test]
async fn user_rows_render_orphaned_roles_as_unknown() {
    let svc = setup();
    let temp = svc
        .roles()
        .create(CreateRole {
            name: "Temp".into(),
            description: String::new(),
            permission_ids: vec![],
        })
        .await
        .unwrap();
    svc.users()
        .assign_roles("1", vec!["1".into(), temp.id.clone()])
        .await
        .unwrap();
    svc.roles().delete(&temp.id).await.unwrap();

    let rows = svc.user_rows().await.unwrap();
    let admin = rows.iter().find(|r| r.user.id == "1").unwrap();
    assert_eq!(admin.role_names, ["Admin", "Unknown"]);
}

#[tokio::test]
async fn role_rows_count_members_and_list_permission_names() {
    let svc = setup();
    svc.users()
        .create(new_user("second-viewer", &["3"]))
        .await
        .unwrap();

    let rows = svc.role_rows().await.unwrap();
    let viewer = rows.iter().find(|r| r.role.id == "3").unwrap();
    assert_eq!(viewer.member_count, 2);
    assert_eq!(viewer.permission_names, ["users:read", "roles:read"]);

    let admin = rows.iter().find(|r| r.role.id == "1").unwrap();
    assert_eq!(admin.member_count, 1);
    assert_eq!(admin.permission_names.len(), 8);
}
