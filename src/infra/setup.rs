use std::fs::File;
use std::sync::Arc;

use env_helpers::get_env_default;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    application::jwt::JwtSessionAuthenticator,
    infra::{config::AppConfig, password::Argon2PasswordHasher, postgres_persistence},
    use_cases::{
        admin_auth::{AdminAuthUseCases, AdminUserRepo},
        health::HealthProbe,
        tenant::{TenantRepo, TenantUseCases},
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let postgres_arc =
        Arc::new(postgres_persistence(&config.database_url, config.db_max_connections).await?);

    let tenant_repo_arc = postgres_arc.clone() as Arc<dyn TenantRepo>;
    let admin_repo_arc = postgres_arc.clone() as Arc<dyn AdminUserRepo>;
    let health_arc = postgres_arc as Arc<dyn HealthProbe>;

    let tenant_use_cases = TenantUseCases::new(
        tenant_repo_arc,
        config.host_rules(),
        config.tenant_url_style(),
        config.slug_max_attempts,
    );

    let admin_auth_use_cases = AdminAuthUseCases::new(
        admin_repo_arc,
        Arc::new(Argon2PasswordHasher),
        Arc::new(JwtSessionAuthenticator::new(
            config.session_secret.clone(),
            config.session_ttl,
        )),
    );

    Ok(AppState {
        host_rules: Arc::new(config.host_rules()),
        config: Arc::new(config),
        tenant_use_cases: Arc::new(tenant_use_cases),
        admin_auth_use_cases: Arc::new(admin_auth_use_cases),
        health_probe: health_arc,
    })
}

/// Bootstrap admin and demo tenants. Safe to run on every start.
pub async fn run_startup_tasks(app_state: &AppState) -> anyhow::Result<()> {
    let config = &app_state.config;

    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(password)) => {
            let created = app_state
                .admin_auth_use_cases
                .ensure_bootstrap_admin(email, password)
                .await?;
            if !created {
                tracing::debug!("Bootstrap admin already present");
            }
        }
        (None, None) => {}
        _ => tracing::warn!("Set both ADMIN_EMAIL and ADMIN_PASSWORD to bootstrap an admin"),
    }

    if config.seed_demo_tenants {
        let created = app_state.tenant_use_cases.seed_demo_tenants().await?;
        tracing::info!(created, "Demo tenants seeded");
    }

    Ok(())
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tenant_hub=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer().with_target(false).with_level(true).pretty();

    // Optional file (structured JSON logs)
    let log_file: String = get_env_default("LOG_FILE", String::new());
    let json_layer = Some(log_file)
        .filter(|path| !path.trim().is_empty())
        .and_then(|path| match File::create(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("cannot create log file {path}: {e}");
                None
            }
        })
        .map(|file| {
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true)
                .boxed()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
