use axum::{
    Extension, Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        routes::{
            json_body,
            tenants::{CreateTenantPayload, TenantEnvelope, create_with_actor, list_tenants},
        },
    },
    app_error::{AppError, AppResult},
    use_cases::admin_auth::AdminSession,
};

/// Mounted behind the admin session gate, which provides `AdminSession`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route(
            "/{id}",
            get(get_tenant).patch(update_status).delete(delete_tenant),
        )
}

#[derive(Deserialize)]
struct UpdateStatusPayload {
    status: Option<String>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Ids that are not UUIDs cannot name a tenant.
fn parse_tenant_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::tenant_not_found())
}

async fn create_tenant(
    State(app_state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    payload: Result<Json<CreateTenantPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    create_with_actor(&app_state, payload, Some(session.user_id)).await
}

async fn get_tenant(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TenantEnvelope>> {
    let tenant_id = parse_tenant_id(&id)?;
    let tenant = app_state.tenant_use_cases.get_tenant_by_id(tenant_id).await?;
    Ok(Json(TenantEnvelope {
        tenant: tenant.into(),
    }))
}

async fn update_status(
    State(app_state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusPayload>, JsonRejection>,
) -> AppResult<Json<TenantEnvelope>> {
    let payload = json_body(payload)?;
    let tenant_id = parse_tenant_id(&id)?;

    let tenant = app_state
        .tenant_use_cases
        .update_status(tenant_id, payload.status.as_deref(), Some(session.user_id))
        .await?;
    Ok(Json(TenantEnvelope {
        tenant: tenant.into(),
    }))
}

async fn delete_tenant(
    State(app_state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let tenant_id = parse_tenant_id(&id)?;
    app_state
        .tenant_use_cases
        .delete_tenant(tenant_id, Some(session.user_id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Tenant deleted successfully",
    }))
}
