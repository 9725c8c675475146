use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::json;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(app_state): State<AppState>) -> Response {
    let timestamp = Utc::now().to_rfc3339();

    match app_state.health_probe.ping().await {
        Ok(()) => Json(json!({
            "status": "ok",
            "timestamp": timestamp,
            "environment": app_state.config.app_env.as_str(),
        }))
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Database connection failed",
                    "timestamp": timestamp,
                })),
            )
                .into_response()
        }
    }
}
