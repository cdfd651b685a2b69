//! Gateway that relays agent session start requests to an agent orchestration
//! service, nesting prompt template parameters under `properties.v2v`.

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod merge;
pub mod models;
pub mod proxy;
pub mod telemetry;

pub use handlers::AppState;
use telemetry::{metrics_middleware, middleware::MAX_BODY_BYTES, MetricsRegistry};

pub const START_ROUTE: &str = "/api/agents/start";

pub fn build_router(state: AppState, metrics_registry: Arc<MetricsRegistry>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(START_ROUTE, post(handlers::start_agent))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(metrics_registry, metrics_middleware))
        .with_state(state)
        .layer(cors)
}
