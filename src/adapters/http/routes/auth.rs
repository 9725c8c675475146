use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, middleware::ADMIN_SESSION_COOKIE, routes::json_body},
    app_error::{AppError, AppResult},
    domain::entities::admin_user::AdminRole,
};

#[derive(Deserialize)]
struct LoginPayload {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Serialize)]
struct SessionUser {
    id: Uuid,
    email: String,
    role: AdminRole,
}

#[derive(Serialize)]
struct LoginResponse {
    message: &'static str,
    user: SessionUser,
}

#[derive(Serialize)]
struct CheckResponse {
    authenticated: bool,
    role: Option<AdminRole>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check", get(check))
}

fn session_cookie(value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((ADMIN_SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .path("/")
        .max_age(max_age)
        .build()
}

async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;
    let (session, token) = app_state
        .admin_auth_use_cases
        .login(
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;

    let config = &app_state.config;
    let cookie = session_cookie(token, config.session_ttl, config.is_production());

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful",
            user: SessionUser {
                id: session.user_id,
                email: session.email,
                role: session.role,
            },
        }),
    ))
}

async fn logout(State(app_state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let cookie = session_cookie(
        String::new(),
        time::Duration::seconds(0),
        app_state.config.is_production(),
    );
    (
        jar.add(cookie),
        Json(json!({ "message": "Logout successful" })),
    )
}

async fn check(State(app_state): State<AppState>, jar: CookieJar) -> Json<CheckResponse> {
    let Some(token) = jar.get(ADMIN_SESSION_COOKIE).map(|c| c.value().to_owned()) else {
        return Json(CheckResponse {
            authenticated: false,
            role: None,
        });
    };

    match app_state.admin_auth_use_cases.authenticate(&token).await {
        Ok(session) => Json(CheckResponse {
            authenticated: true,
            role: Some(session.role),
        }),
        Err(err) => {
            if !matches!(err, AppError::Unauthorized) {
                tracing::warn!(error = %err, "Session check failed");
            }
            Json(CheckResponse {
                authenticated: false,
                role: None,
            })
        }
    }
}
