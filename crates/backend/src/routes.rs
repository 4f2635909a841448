use axum::{middleware, routing::get, Router};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::system::access::{handlers, middleware::access_gate, AccessState};
use crate::system::middleware::request_logger::request_logger;

/// Конфигурация всех роутов шлюза
///
/// Every request passes the access gate first; anything that is not an API
/// route is served from the built frontend, with `index.html` as the SPA
/// fallback.
pub fn configure_routes(state: AccessState, static_dir: &Path) -> Router {
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/access/policy", get(handlers::policy))
        .route("/api/access/navigation", get(handlers::navigation))
        .route("/api/access/session", get(handlers::session))
        .fallback_service(spa)
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer(middleware::from_fn(request_logger))
        .with_state(state)
}
