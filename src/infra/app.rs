use axum::{Router, body::Body, http, middleware};
use http::header::CONTENT_TYPE;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::adapters::{
    self,
    http::{app_state::AppState, middleware::tenant_routing},
};

pub fn create_app(app_state: AppState) -> Router {
    let config = app_state.config.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _request| {
            origin
                .to_str()
                .is_ok_and(|origin| config.is_allowed_origin(origin))
        }))
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PATCH,
            http::Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    let routes = Router::new()
        .nest("/api", adapters::http::routes::router(&app_state))
        .merge(adapters::http::routes::pages::router(&app_state))
        .with_state(app_state.clone());

    // Tenant routing wraps the whole router so rewritten paths are matched.
    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn_with_state(app_state, tenant_routing))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(SetResponseHeaderLayer::if_not_present(
                    http::header::X_CONTENT_TYPE_OPTIONS,
                    http::HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    http::header::X_FRAME_OPTIONS,
                    http::HeaderValue::from_static("DENY"),
                ))
                .layer(cors),
        )
}

fn make_span(request: &http::Request<Body>) -> tracing::Span {
    let request_id = Uuid::new_v4();
    tracing::info_span!(
        "http-request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        request_id = %request_id
    )
}
