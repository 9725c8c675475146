use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::helpers::host_parsing::HostRules,
    infra::config::AppConfig,
    use_cases::{admin_auth::AdminAuthUseCases, health::HealthProbe, tenant::TenantUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub host_rules: Arc<HostRules>,
    pub tenant_use_cases: Arc<TenantUseCases>,
    pub admin_auth_use_cases: Arc<AdminAuthUseCases>,
    pub health_probe: Arc<dyn HealthProbe>,
}

impl FromRef<AppState> for Arc<TenantUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tenant_use_cases.clone()
    }
}

impl FromRef<AppState> for Arc<AdminAuthUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.admin_auth_use_cases.clone()
    }
}
