use axum::{
    extract::{Request, State},
    http::{HeaderValue, Uri, header::HOST, uri::PathAndQuery},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::helpers::host_parsing::resolve_tenant_slug,
    use_cases::admin_auth::AdminSession,
};

pub const TENANT_SLUG_HEADER: &str = "x-tenant-slug";
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";
pub const LOGIN_PATH: &str = "/login";

/// Tenant resolved from the request host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub slug: String,
}

/// Resolve the tenant from the host and route the request to its pages.
///
/// Runs before routing. A client-supplied `x-tenant-slug` header is never trusted.
pub async fn tenant_routing(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    request.headers_mut().remove(TENANT_SLUG_HEADER);

    let host = request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let url = request.uri().to_string();

    let Some((slug, header_value)) = resolve_tenant_slug(host, &url, &app_state.host_rules)
        .and_then(|slug| HeaderValue::from_str(&slug).ok().map(|value| (slug, value)))
    else {
        return next.run(request).await;
    };

    if let Some(uri) = rewrite_uri(request.uri(), &slug) {
        tracing::debug!(from = %request.uri(), to = %uri, "Tenant route rewrite");
        *request.uri_mut() = uri;
    }
    request
        .headers_mut()
        .insert(TENANT_SLUG_HEADER, header_value.clone());
    request.extensions_mut().insert(TenantContext { slug });

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(TENANT_SLUG_HEADER, header_value);
    response
}

/// Tenant-scoped page path for `path`, or `None` when the path is left alone
/// (API calls and paths already under `/tenant/`).
pub fn tenant_path(path: &str, slug: &str) -> Option<String> {
    let is_under = |prefix: &str| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    };
    if is_under("/api") || is_under("/tenant") {
        return None;
    }
    if path.is_empty() || path == "/" {
        return Some(format!("/tenant/{slug}"));
    }
    Some(format!("/tenant/{slug}{path}"))
}

fn rewrite_uri(uri: &Uri, slug: &str) -> Option<Uri> {
    let path = tenant_path(uri.path(), slug)?;
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}

async fn authenticate(app_state: &AppState, jar: &CookieJar) -> AppResult<AdminSession> {
    let token = jar
        .get(ADMIN_SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthorized)?;
    app_state.admin_auth_use_cases.authenticate(token).await
}

/// Gate for admin API routes: 401 JSON without a valid session.
pub async fn require_admin_api(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = authenticate(&app_state, &jar).await?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Gate for admin pages: redirect to the login page without a valid session.
pub async fn require_admin_page(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&app_state, &jar).await {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(AppError::Unauthorized) => Redirect::to(LOGIN_PATH).into_response(),
        Err(err) => err.into_response(),
    }
}
