use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes::json_body},
    app_error::AppResult,
    domain::entities::tenant::TenantStatus,
    use_cases::tenant::TenantProfile,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route("/{slug}", get(get_tenant))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
}

impl From<TenantProfile> for TenantResponse {
    fn from(tenant: TenantProfile) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name,
            slug: tenant.slug,
            status: tenant.status,
            created_at: tenant.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTenantPayload {
    pub name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantResponse {
    pub tenant: TenantResponse,
    pub url_hint: String,
}

#[derive(Serialize)]
pub struct TenantEnvelope {
    pub tenant: TenantResponse,
}

#[derive(Serialize)]
pub struct TenantListResponse {
    pub tenants: Vec<TenantResponse>,
}

pub(super) async fn list_tenants(
    State(app_state): State<AppState>,
) -> AppResult<Json<TenantListResponse>> {
    let tenants = app_state.tenant_use_cases.list_tenants().await?;
    Ok(Json(TenantListResponse {
        tenants: tenants.into_iter().map(TenantResponse::from).collect(),
    }))
}

/// Public sign-up: no audit actor.
async fn create_tenant(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateTenantPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    create_with_actor(&app_state, payload, None).await
}

pub(super) async fn create_with_actor(
    app_state: &AppState,
    payload: CreateTenantPayload,
    actor_id: Option<Uuid>,
) -> AppResult<(StatusCode, Json<CreateTenantResponse>)> {
    let tenants = &app_state.tenant_use_cases;
    let tenant = tenants
        .create_tenant(payload.name.as_deref(), actor_id)
        .await?;
    let url_hint = tenants.url_hint(&tenant.slug);

    Ok((
        StatusCode::CREATED,
        Json(CreateTenantResponse {
            tenant: tenant.into(),
            url_hint,
        }),
    ))
}

async fn get_tenant(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<TenantEnvelope>> {
    let tenant = app_state.tenant_use_cases.get_tenant_by_slug(&slug).await?;
    Ok(Json(TenantEnvelope {
        tenant: tenant.into(),
    }))
}
