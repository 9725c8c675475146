use async_trait::async_trait;
use serde_json::json;
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, insert_audit_entry, is_unique_violation},
    app_error::{AppError, AppResult},
    domain::entities::{
        audit_log::{AuditAction, AuditEntry},
        tenant::TenantStatus,
    },
    use_cases::tenant::{TenantProfile, TenantRepo},
};

const TENANT_COLUMNS: &str = "id, name, slug, status, created_at, updated_at";

fn row_to_profile(row: PgRow) -> AppResult<TenantProfile> {
    let status: String = row.get("status");
    let status = status
        .parse::<TenantStatus>()
        .map_err(|_| AppError::Database(format!("Unknown tenant status in storage: {status}")))?;

    Ok(TenantProfile {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn slug_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict("A tenant with this name already exists".into())
    } else {
        AppError::from(err)
    }
}

#[async_trait]
impl TenantRepo for PostgresPersistence {
    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tenants WHERE slug = $1)")
            .bind(slug)
            .fetch_one(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(exists)
    }

    async fn create(
        &self,
        name: &str,
        slug: &str,
        actor_id: Option<Uuid>,
    ) -> AppResult<TenantProfile> {
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query(&format!(
            r#"
                INSERT INTO tenants (id, name, slug, status)
                VALUES ($1, $2, $3, $4)
                RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(slug)
        .bind(TenantStatus::default().as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(slug_conflict)?;
        let tenant = row_to_profile(row)?;

        let entry = AuditEntry::tenant(
            AuditAction::Create,
            tenant.id,
            actor_id,
            json!({ "name": tenant.name, "slug": tenant.slug }),
        );
        insert_audit_entry(&mut tx, &entry).await?;

        tx.commit().await?;
        Ok(tenant)
    }

    async fn get_by_slug(&self, slug: &str) -> AppResult<Option<TenantProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        row.map(row_to_profile).transpose()
    }

    async fn get_by_id(&self, tenant_id: Uuid) -> AppResult<Option<TenantProfile>> {
        let row = sqlx::query(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = $1"
        ))
        .bind(tenant_id)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        row.map(row_to_profile).transpose()
    }

    async fn list(&self) -> AppResult<Vec<TenantProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;
        rows.into_iter().map(row_to_profile).collect()
    }

    async fn update_status(
        &self,
        tenant_id: Uuid,
        status: TenantStatus,
        actor_id: Option<Uuid>,
    ) -> AppResult<Option<TenantProfile>> {
        let mut tx = self.pool().begin().await?;

        let previous: Option<String> =
            sqlx::query_scalar("SELECT status FROM tenants WHERE id = $1 FOR UPDATE")
                .bind(tenant_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::from)?;
        let Some(previous) = previous else {
            return Ok(None);
        };

        let row = sqlx::query(&format!(
            r#"
                UPDATE tenants
                SET status = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING {TENANT_COLUMNS}
            "#
        ))
        .bind(tenant_id)
        .bind(status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from)?;
        let tenant = row_to_profile(row)?;

        let entry = AuditEntry::tenant(
            AuditAction::UpdateStatus,
            tenant.id,
            actor_id,
            json!({ "from": previous, "to": status.as_str() }),
        );
        insert_audit_entry(&mut tx, &entry).await?;

        tx.commit().await?;
        Ok(Some(tenant))
    }

    async fn delete(&self, tenant_id: Uuid, actor_id: Option<Uuid>) -> AppResult<bool> {
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query("DELETE FROM tenants WHERE id = $1 RETURNING name, slug")
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::from)?;
        let Some(row) = row else {
            return Ok(false);
        };

        let name: String = row.get("name");
        let slug: String = row.get("slug");
        let entry = AuditEntry::tenant(
            AuditAction::Delete,
            tenant_id,
            actor_id,
            json!({ "name": name, "slug": slug }),
        );
        insert_audit_entry(&mut tx, &entry).await?;

        tx.commit().await?;
        Ok(true)
    }
}
