//! Test data factories. Use the closure to override fields.

use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;
use time::Duration;
use uuid::Uuid;

use crate::{
    application::helpers::host_parsing::HostRules,
    domain::entities::{admin_user::AdminRole, tenant::TenantStatus},
    infra::config::{AppConfig, AppEnv},
    use_cases::{admin_auth::AdminUserProfile, tenant::TenantProfile},
};

pub const TEST_ROOT_DOMAIN: &str = "cavyor.in";
pub const TEST_PREVIEW_SUFFIX: &str = "myapp.vercel.app";

pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn test_host_rules() -> HostRules {
    HostRules::new(
        TEST_ROOT_DOMAIN,
        Some(TEST_PREVIEW_SUFFIX),
        ["www", "api", "admin"],
    )
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://localhost/tenant_hub_test".to_string(),
        db_max_connections: 1,
        bind_addr: "127.0.0.1:4000".parse().unwrap(),
        app_env: AppEnv::Development,
        root_domain: TEST_ROOT_DOMAIN.to_string(),
        dev_port: 3001,
        preview_domain_suffix: Some(TEST_PREVIEW_SUFFIX.to_string()),
        reserved_subdomains: vec!["www".into(), "api".into(), "admin".into()],
        api_base_url: "http://localhost:4000".parse().unwrap(),
        session_secret: SecretString::from("test-session-secret-of-sufficient-length".to_string()),
        session_ttl: Duration::seconds(86_400),
        admin_email: None,
        admin_password: None,
        seed_demo_tenants: false,
        slug_max_attempts: 100,
    }
}

/// Create a test tenant with a unique slug.
pub fn create_test_tenant(overrides: impl FnOnce(&mut TenantProfile)) -> TenantProfile {
    let id = Uuid::new_v4();
    let mut tenant = TenantProfile {
        id,
        name: "Test Tenant".to_string(),
        slug: format!("tenant-{}", &id.simple().to_string()[..8]),
        status: TenantStatus::Active,
        created_at: test_datetime(),
        updated_at: test_datetime(),
    };
    overrides(&mut tenant);
    tenant
}

/// Create an active super admin whose password is "password".
pub fn create_test_admin(overrides: impl FnOnce(&mut AdminUserProfile)) -> AdminUserProfile {
    let mut user = AdminUserProfile {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        password_hash: "plain:password".to_string(),
        role: AdminRole::SuperAdmin,
        is_active: true,
        last_login_at: None,
        created_at: test_datetime(),
    };
    overrides(&mut user);
    user
}
