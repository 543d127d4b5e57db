//! Application router builder.
//!
//! Shared by the standalone binary and [`crate::server::spawn`] so tests
//! exercise the same middleware stack the manual setup uses.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::FakeConfig;
use crate::handlers;
use crate::state::FakeState;

/// Build the `/api` route tree.
///
/// ```text
/// GET    /list     -> list_items   (?kind=fruits|vegetables)
/// GET    /cart     -> get_cart
/// PUT    /cart     -> add_to_cart  (body: JSON item id)
/// ```
pub fn api_routes() -> Router<FakeState> {
    Router::new()
        .route("/list", get(handlers::list_items))
        .route("/cart", get(handlers::get_cart).put(handlers::add_to_cart))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full fake-backend [`Router`] with tracing and CORS layers.
pub fn build_router(state: FakeState) -> Router {
    let cors = build_cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from configuration, skipping origins that are not
/// valid header values.
pub fn build_cors_layer(config: &FakeConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}
