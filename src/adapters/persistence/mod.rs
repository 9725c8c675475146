use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::audit_log::AuditEntry,
    use_cases::health::HealthProbe,
};

pub mod admin_user;
pub mod tenant;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl HealthProbe for PostgresPersistence {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}

/// Append an audit row on the caller's connection, normally an open transaction.
pub(crate) async fn insert_audit_entry(
    conn: &mut PgConnection,
    entry: &AuditEntry,
) -> AppResult<()> {
    sqlx::query(
        r#"
            INSERT INTO audit_logs (action, resource, resource_id, actor_id, metadata)
            VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(entry.action.as_str())
    .bind(entry.resource)
    .bind(entry.resource_id)
    .bind(entry.actor_id)
    .bind(&entry.metadata)
    .execute(&mut *conn)
    .await
    .map_err(AppError::from)?;
    Ok(())
}

/// SQLSTATE 23505.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            return AppError::Conflict("A record with this value already exists".into());
        }
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            other => {
                tracing::error!(error = %other, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}
