//! In-memory tenant repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        audit_log::{AuditAction, AuditEntry},
        tenant::TenantStatus,
    },
    use_cases::tenant::{TenantProfile, TenantRepo},
};

/// In-memory implementation of `TenantRepo` that also records audit entries.
#[derive(Default)]
pub struct InMemoryTenantRepo {
    pub tenants: Mutex<HashMap<Uuid, TenantProfile>>,
    pub audit: Mutex<Vec<AuditEntry>>,
    /// Slugs `slug_exists` does not report but `create` rejects, as if another
    /// request inserted them after the check.
    hidden_slugs: HashSet<String>,
}

impl InMemoryTenantRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(tenants: Vec<TenantProfile>) -> Self {
        Self {
            tenants: Mutex::new(tenants.into_iter().map(|t| (t.id, t)).collect()),
            ..Self::default()
        }
    }

    pub fn with_hidden_slugs<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_slugs = slugs.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, tenant_id: Uuid) -> Option<TenantProfile> {
        self.tenants.lock().unwrap().get(&tenant_id).cloned()
    }

    pub fn get_all(&self) -> Vec<TenantProfile> {
        self.tenants.lock().unwrap().values().cloned().collect()
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.lock().unwrap().clone()
    }

    fn record(&self, entry: AuditEntry) {
        self.audit.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl TenantRepo for InMemoryTenantRepo {
    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        Ok(self
            .tenants
            .lock()
            .unwrap()
            .values()
            .any(|t| t.slug == slug))
    }

    async fn create(
        &self,
        name: &str,
        slug: &str,
        actor_id: Option<Uuid>,
    ) -> AppResult<TenantProfile> {
        let tenant = {
            let mut tenants = self.tenants.lock().unwrap();
            if self.hidden_slugs.contains(slug) || tenants.values().any(|t| t.slug == slug) {
                return Err(AppError::Conflict(
                    "A tenant with this name already exists".into(),
                ));
            }

            let now = Utc::now();
            let tenant = TenantProfile {
                id: Uuid::new_v4(),
                name: name.to_string(),
                slug: slug.to_string(),
                status: TenantStatus::default(),
                created_at: now,
                updated_at: now,
            };
            tenants.insert(tenant.id, tenant.clone());
            tenant
        };

        self.record(AuditEntry::tenant(
            AuditAction::Create,
            tenant.id,
            actor_id,
            json!({ "name": tenant.name, "slug": tenant.slug }),
        ));
        Ok(tenant)
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<TenantProfile>> {
        Ok(self
            .tenants
            .lock()
            .unwrap()
            .values()
            .find(|t| t.slug == slug)
            .cloned())
    }

    async fn get_by_id(&self, tenant_id: Uuid) -> AppResult<Option<TenantProfile>> {
        Ok(self.get(tenant_id))
    }

    async fn list(&self) -> AppResult<Vec<TenantProfile>> {
        let mut tenants = self.get_all();
        tenants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tenants)
    }

    async fn update_status(
        &self,
        tenant_id: Uuid,
        status: TenantStatus,
        actor_id: Option<Uuid>,
    ) -> AppResult<Option<TenantProfile>> {
        let (previous, updated) = {
            let mut tenants = self.tenants.lock().unwrap();
            let Some(tenant) = tenants.get_mut(&tenant_id) else {
                return Ok(None);
            };
            let previous = tenant.status;
            tenant.status = status;
            tenant.updated_at = Utc::now();
            (previous, tenant.clone())
        };

        self.record(AuditEntry::tenant(
            AuditAction::UpdateStatus,
            tenant_id,
            actor_id,
            json!({ "from": previous.as_str(), "to": status.as_str() }),
        ));
        Ok(Some(updated))
    }

    async fn delete(&self, tenant_id: Uuid, actor_id: Option<Uuid>) -> AppResult<bool> {
        let Some(removed) = self.tenants.lock().unwrap().remove(&tenant_id) else {
            return Ok(false);
        };

        self.record(AuditEntry::tenant(
            AuditAction::Delete,
            tenant_id,
            actor_id,
            json!({ "name": removed.name, "slug": removed.slug }),
        ));
        Ok(true)
    }
}
