//! Minimal server-rendered pages. Every interpolated value is HTML-escaped.

use axum::{
    Extension, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{TenantContext, require_admin_page},
    },
    app_error::{AppError, AppResult},
    use_cases::{admin_auth::AdminSession, tenant::TenantProfile},
};

pub fn router(app_state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/admin", get(admin_page))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_admin_page,
        ));

    Router::new()
        .route("/", get(landing_page))
        .route("/login", get(login_page))
        .route("/tenant/{slug}", get(tenant_page))
        .route("/tenant/{slug}/{*rest}", get(tenant_subpage))
        .merge(admin)
}

fn layout(app_state: &AppState, title: &str, body: &str) -> Html<String> {
    let api_base = app_state.config.api_base_url.as_str().trim_end_matches('/');
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body data-api-base="{api_base}">
{body}
</body>
</html>"#,
        title = encode_text(title),
        api_base = encode_double_quoted_attribute(api_base),
    ))
}

const CREATE_TENANT_SCRIPT: &str = r#"<script>
document.getElementById('create-tenant').addEventListener('submit', async (event) => {
  event.preventDefault();
  const api = document.body.dataset.apiBase;
  const out = document.getElementById('result');
  const res = await fetch(api + '/api/tenants', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ name: event.target.name.value }),
  });
  const data = await res.json();
  out.textContent = res.ok ? 'Created! Visit ' + data.urlHint : data.error;
});
</script>"#;

async fn landing_page(State(app_state): State<AppState>) -> Html<String> {
    let body = format!(
        r#"<main>
<h1>Create your workspace</h1>
<form id="create-tenant">
  <label>Organization name <input name="name" minlength="2" maxlength="64" required></label>
  <button type="submit">Create</button>
</form>
<p id="result" role="status"></p>
<p><a href="/login">Admin sign in</a></p>
</main>
{CREATE_TENANT_SCRIPT}"#
    );
    layout(&app_state, "Create a tenant", &body)
}

const LOGIN_SCRIPT: &str = r#"<script>
document.getElementById('login').addEventListener('submit', async (event) => {
  event.preventDefault();
  const api = document.body.dataset.apiBase;
  const res = await fetch(api + '/api/auth/login', {
    method: 'POST',
    credentials: 'include',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      email: event.target.email.value,
      password: event.target.password.value,
    }),
  });
  if (res.ok) {
    window.location.href = '/admin';
  } else {
    const data = await res.json();
    document.getElementById('error').textContent = data.error;
  }
});
</script>"#;

async fn login_page(State(app_state): State<AppState>) -> Html<String> {
    let body = format!(
        r#"<main>
<h1>Admin sign in</h1>
<form id="login">
  <label>Email <input name="email" type="email" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Sign in</button>
</form>
<p id="error" role="alert"></p>
</main>
{LOGIN_SCRIPT}"#
    );
    layout(&app_state, "Admin sign in", &body)
}

const ADMIN_SCRIPT: &str = r#"<script>
const api = document.body.dataset.apiBase;
document.querySelectorAll('[data-status]').forEach((button) => {
  button.addEventListener('click', async () => {
    await fetch(api + '/api/admin/tenants/' + button.dataset.id, {
      method: 'PATCH',
      credentials: 'include',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ status: button.dataset.status }),
    });
    window.location.reload();
  });
});
document.querySelectorAll('[data-delete]').forEach((button) => {
  button.addEventListener('click', async () => {
    if (!confirm('Delete this tenant?')) return;
    await fetch(api + '/api/admin/tenants/' + button.dataset.id, {
      method: 'DELETE',
      credentials: 'include',
    });
    window.location.reload();
  });
});
document.getElementById('logout').addEventListener('click', async () => {
  await fetch(api + '/api/auth/logout', { method: 'POST', credentials: 'include' });
  window.location.href = '/login';
});
</script>"#;

fn tenant_row(tenant: &TenantProfile) -> String {
    let id = tenant.id.to_string();
    let toggle = if tenant.status.is_active() {
        "suspended"
    } else {
        "active"
    };
    format!(
        r#"<tr>
  <td>{name}</td><td>{slug}</td><td>{status}</td><td>{created}</td>
  <td>
    <button data-id="{id}" data-status="{toggle}">Set {toggle}</button>
    <button data-id="{id}" data-delete>Delete</button>
  </td>
</tr>"#,
        name = encode_text(&tenant.name),
        slug = encode_text(&tenant.slug),
        status = tenant.status,
        created = tenant.created_at.format("%Y-%m-%d %H:%M"),
    )
}

async fn admin_page(
    State(app_state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> AppResult<Html<String>> {
    let tenants = app_state.tenant_use_cases.list_tenants().await?;
    let rows: String = tenants.iter().map(tenant_row).collect();

    let body = format!(
        r#"<main>
<header>
  <h1>Tenants</h1>
  <p>Signed in as {email} <button id="logout">Sign out</button></p>
</header>
<table>
  <thead><tr><th>Name</th><th>Slug</th><th>Status</th><th>Created</th><th></th></tr></thead>
  <tbody>{rows}</tbody>
</table>
</main>
{ADMIN_SCRIPT}"#,
        email = encode_text(&session.email),
    );
    Ok(layout(&app_state, "Tenant admin", &body))
}

async fn tenant_page(
    State(app_state): State<AppState>,
    context: Option<Extension<TenantContext>>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    render_tenant(&app_state, context.map(|Extension(c)| c), &slug, None).await
}

async fn tenant_subpage(
    State(app_state): State<AppState>,
    context: Option<Extension<TenantContext>>,
    Path((slug, rest)): Path<(String, String)>,
) -> AppResult<Response> {
    render_tenant(&app_state, context.map(|Extension(c)| c), &slug, Some(&rest)).await
}

async fn render_tenant(
    app_state: &AppState,
    context: Option<TenantContext>,
    slug: &str,
    section: Option<&str>,
) -> AppResult<Response> {
    // On a tenant host only that tenant's pages are reachable.
    if context.is_some_and(|c| c.slug != slug) {
        return Ok(not_found_page(app_state));
    }

    let tenant = match app_state.tenant_use_cases.get_tenant_by_slug(slug).await {
        Ok(tenant) => tenant,
        Err(AppError::NotFound(_)) => return Ok(not_found_page(app_state)),
        Err(err) => return Err(err),
    };

    let notice = if tenant.status.is_active() {
        String::new()
    } else {
        format!(
            r#"<p role="alert">This workspace is {}. Contact support to restore access.</p>"#,
            tenant.status
        )
    };
    let section = section
        .filter(|s| !s.is_empty())
        .map(|s| format!("<h2>{}</h2>", encode_text(s)))
        .unwrap_or_default();

    let body = format!(
        r#"<main>
<h1>{name}</h1>
{notice}
{section}
<dl>
  <dt>Workspace</dt><dd>{slug}</dd>
  <dt>Status</dt><dd>{status}</dd>
  <dt>Created</dt><dd>{created}</dd>
</dl>
</main>"#,
        name = encode_text(&tenant.name),
        slug = encode_text(&tenant.slug),
        status = tenant.status,
        created = tenant.created_at.format("%Y-%m-%d"),
    );
    Ok(layout(app_state, &tenant.name, &body).into_response())
}

fn not_found_page(app_state: &AppState) -> Response {
    let body = r#"<main>
<h1>Tenant not found</h1>
<p>This workspace does not exist. <a href="/">Create one</a>.</p>
</main>"#;
    (
        StatusCode::NOT_FOUND,
        layout(app_state, "Tenant not found", body),
    )
        .into_response()
}
