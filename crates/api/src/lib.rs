//! HTTP API server for the flight events analyzer.
//!
//! Exposes positional, random, and aggregate queries over the event log,
//! with structured logging (tracing) and Prometheus metrics. Every request
//! re-scans the log through a fresh cursor; the service itself holds no
//! query state.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use stream_query::EventSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::events::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: EventSource + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/flights/schedule", get(routes::events::schedule_at_index::<S>))
        .route("/flights/schedule/random", get(routes::events::random_schedule::<S>))
        .route("/passenger/checkin", get(routes::events::checkin_at_index::<S>))
        .route("/passenger/checkin/random", get(routes::events::random_checkin::<S>))
        .route("/stats", get(routes::events::stats::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
