use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::helpers::host_parsing::HostRules;
use crate::application::slug::{resolve_unique_slug, slugify};
use crate::application::validators::validate_tenant_name;
use crate::domain::entities::tenant::TenantStatus;

/// Tenants created by `seed_demo_tenants`.
pub const DEMO_TENANTS: [&str; 2] = ["Demo Company", "Test Corp"];

#[async_trait]
pub trait TenantRepo: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;
    /// Inserts the tenant and its `CREATE` audit entry in one transaction.
    /// A slug that is already taken surfaces as `AppError::Conflict`.
    async fn create(
        &self,
        name: &str,
        slug: &str,
        actor_id: Option<Uuid>,
    ) -> AppResult<TenantProfile>;
    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<TenantProfile>>;
    async fn get_by_id(&self, tenant_id: Uuid) -> AppResult<Option<TenantProfile>>;
    /// Newest first.
    async fn list(&self) -> AppResult<Vec<TenantProfile>>;
    async fn update_status(
        &self,
        tenant_id: Uuid,
        status: TenantStatus,
        actor_id: Option<Uuid>,
    ) -> AppResult<Option<TenantProfile>>;
    /// Returns `false` when no tenant had this id.
    async fn delete(&self, tenant_id: Uuid, actor_id: Option<Uuid>) -> AppResult<bool>;
}

/// How tenant URLs are presented back to the user after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantUrlStyle {
    /// `<slug>.localhost:<port>`
    Local { port: u16 },
    /// `<slug>.<root_domain>`
    Subdomain { root_domain: String },
}

impl TenantUrlStyle {
    pub fn url_hint(&self, slug: &str) -> String {
        match self {
            TenantUrlStyle::Local { port } => format!("{slug}.localhost:{port}"),
            TenantUrlStyle::Subdomain { root_domain } => format!("{slug}.{root_domain}"),
        }
    }
}

#[derive(Clone)]
pub struct TenantUseCases {
    repo: Arc<dyn TenantRepo>,
    host_rules: HostRules,
    url_style: TenantUrlStyle,
    max_slug_attempts: usize,
}

impl TenantUseCases {
    pub fn new(
        repo: Arc<dyn TenantRepo>,
        host_rules: HostRules,
        url_style: TenantUrlStyle,
        max_slug_attempts: usize,
    ) -> Self {
        Self {
            repo,
            host_rules,
            url_style,
            max_slug_attempts,
        }
    }

    pub fn url_hint(&self, slug: &str) -> String {
        self.url_style.url_hint(slug)
    }

    #[instrument(skip(self))]
    pub async fn create_tenant(
        &self,
        name: Option<&str>,
        actor_id: Option<Uuid>,
    ) -> AppResult<TenantProfile> {
        let name = validate_tenant_name(name)?;

        let base_slug = slugify(&name);
        if base_slug.is_empty() {
            return Err(AppError::InvalidInput("Invalid tenant name".into()));
        }
        if self.host_rules.is_reserved(&base_slug) {
            return Err(AppError::InvalidInput(format!(
                "Cannot create a tenant with the name \"{base_slug}\" as it is reserved"
            )));
        }

        let repo = self.repo.clone();
        let slug = resolve_unique_slug(&base_slug, self.max_slug_attempts, |candidate| {
            let repo = repo.clone();
            async move { repo.slug_exists(&candidate).await }
        })
        .await?;

        let tenant = self.repo.create(&name, &slug, actor_id).await?;
        tracing::info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant created");
        Ok(tenant)
    }

    #[instrument(skip(self))]
    pub async fn get_tenant_by_slug(&self, slug: &str) -> AppResult<TenantProfile> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(AppError::tenant_not_found)
    }

    #[instrument(skip(self))]
    pub async fn get_tenant_by_id(&self, tenant_id: Uuid) -> AppResult<TenantProfile> {
        self.repo
            .get_by_id(tenant_id)
            .await?
            .ok_or_else(AppError::tenant_not_found)
    }

    #[instrument(skip(self))]
    pub async fn list_tenants(&self) -> AppResult<Vec<TenantProfile>> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        tenant_id: Uuid,
        raw_status: Option<&str>,
        actor_id: Option<Uuid>,
    ) -> AppResult<TenantProfile> {
        let status: TenantStatus = raw_status.unwrap_or_default().parse()?;

        let tenant = self
            .repo
            .update_status(tenant_id, status, actor_id)
            .await?
            .ok_or_else(AppError::tenant_not_found)?;
        tracing::info!(tenant_id = %tenant.id, status = %status, "Tenant status updated");
        Ok(tenant)
    }

    #[instrument(skip(self))]
    pub async fn delete_tenant(&self, tenant_id: Uuid, actor_id: Option<Uuid>) -> AppResult<()> {
        if !self.repo.delete(tenant_id, actor_id).await? {
            return Err(AppError::tenant_not_found());
        }
        tracing::info!(tenant_id = %tenant_id, "Tenant deleted");
        Ok(())
    }

    /// Create the demo tenants that do not exist yet. Returns how many were created.
    #[instrument(skip(self))]
    pub async fn seed_demo_tenants(&self) -> AppResult<usize> {
        let mut created = 0;
        for name in DEMO_TENANTS {
            let slug = slugify(name);
            if self.repo.slug_exists(&slug).await? {
                continue;
            }
            match self.repo.create(name, &slug, None).await {
                Ok(_) => created += 1,
                // Another instance seeded it first.
                Err(AppError::Conflict(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(created)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TenantProfile {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
