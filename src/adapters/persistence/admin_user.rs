use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, is_unique_violation},
    app_error::{AppError, AppResult},
    domain::entities::admin_user::AdminRole,
    use_cases::admin_auth::{AdminUserProfile, AdminUserRepo},
};

fn row_to_profile(row: PgRow) -> AdminUserProfile {
    AdminUserProfile {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: AdminRole::from_str(row.get("role")),
        is_active: row.get("is_active"),
        last_login_at: row.get("last_login_at"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl AdminUserRepo for PostgresPersistence {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<AdminUserProfile>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, is_active, last_login_at, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_profile))
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<AdminUserProfile>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, is_active, last_login_at, created_at FROM admin_users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_profile))
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> AppResult<AdminUserProfile> {
        let row = sqlx::query(
            r#"
                INSERT INTO admin_users (id, email, password_hash, role)
                VALUES ($1, $2, $3, $4)
                RETURNING id, email, password_hash, role, is_active, last_login_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("An admin with this email already exists".into())
            } else {
                AppError::from(e)
            }
        })?;
        Ok(row_to_profile(row))
    }

    async fn record_login(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE admin_users SET last_login_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
