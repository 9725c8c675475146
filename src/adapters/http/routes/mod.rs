pub mod admin_tenants;
pub mod auth;
pub mod health;
pub mod pages;
pub mod tenants;

use axum::{Json, Router, extract::rejection::JsonRejection, middleware};

use crate::{
    adapters::http::{app_state::AppState, middleware::require_admin_api},
    app_error::{AppError, AppResult},
};

/// Routes mounted under `/api`.
pub fn router(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/tenants", tenants::router())
        .nest(
            "/admin/tenants",
            admin_tenants::router().route_layer(middleware::from_fn_with_state(
                app_state.clone(),
                require_admin_api,
            )),
        )
        .nest("/auth", auth::router())
}

/// Malformed JSON bodies are client errors with the usual error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}
