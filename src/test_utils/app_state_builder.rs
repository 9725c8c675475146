//! `TestAppStateBuilder`: an `AppState` wired to in-memory mocks.

use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    infra::config::AppConfig,
    test_utils::{
        InMemoryAdminUserRepo, InMemoryTenantRepo, PlainTextPasswordHasher, StaticHealthProbe,
        StaticSessionAuthenticator, test_config,
    },
    use_cases::{
        admin_auth::{AdminAuthUseCases, AdminUserProfile},
        health::HealthProbe,
        tenant::{TenantProfile, TenantUseCases},
    },
};

/// Repositories behind a built state, for assertions.
pub struct TestRepos {
    pub tenants: Arc<InMemoryTenantRepo>,
    pub admins: Arc<InMemoryAdminUserRepo>,
}

/// # Example
///
/// ```ignore
/// let admin = create_test_admin(|_| {});
/// let app_state = TestAppStateBuilder::new()
///     .with_admin(admin.clone())
///     .with_tenant(create_test_tenant(|t| t.slug = "acme".into()))
///     .build();
/// ```
pub struct TestAppStateBuilder {
    config: AppConfig,
    tenants: Vec<TenantProfile>,
    admins: Vec<AdminUserProfile>,
    hidden_slugs: Vec<String>,
    health_probe: Option<Arc<dyn HealthProbe>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            tenants: vec![],
            admins: vec![],
            hidden_slugs: vec![],
            health_probe: None,
        }
    }

    pub fn with_config(mut self, overrides: impl FnOnce(&mut AppConfig)) -> Self {
        overrides(&mut self.config);
        self
    }

    pub fn with_tenant(mut self, tenant: TenantProfile) -> Self {
        self.tenants.push(tenant);
        self
    }

    pub fn with_admin(mut self, admin: AdminUserProfile) -> Self {
        self.admins.push(admin);
        self
    }

    /// See `InMemoryTenantRepo::with_hidden_slugs`.
    pub fn with_hidden_slugs<const N: usize>(mut self, slugs: [&str; N]) -> Self {
        self.hidden_slugs
            .extend(slugs.iter().map(|slug| slug.to_string()));
        self
    }

    pub fn with_health_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.health_probe = Some(probe);
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_repos().0
    }

    pub fn build_with_repos(self) -> (AppState, TestRepos) {
        let tenant_repo = Arc::new(
            InMemoryTenantRepo::with_tenants(self.tenants).with_hidden_slugs(self.hidden_slugs),
        );
        let admin_repo = Arc::new(InMemoryAdminUserRepo::with_users(self.admins));

        let tenant_use_cases = TenantUseCases::new(
            tenant_repo.clone(),
            self.config.host_rules(),
            self.config.tenant_url_style(),
            self.config.slug_max_attempts,
        );
        let admin_auth_use_cases = AdminAuthUseCases::new(
            admin_repo.clone(),
            Arc::new(PlainTextPasswordHasher),
            Arc::new(StaticSessionAuthenticator),
        );

        let app_state = AppState {
            host_rules: Arc::new(self.config.host_rules()),
            config: Arc::new(self.config),
            tenant_use_cases: Arc::new(tenant_use_cases),
            admin_auth_use_cases: Arc::new(admin_auth_use_cases),
            health_probe: self
                .health_probe
                .unwrap_or_else(|| Arc::new(StaticHealthProbe)),
        };

        (
            app_state,
            TestRepos {
                tenants: tenant_repo,
                admins: admin_repo,
            },
        )
    }
}
