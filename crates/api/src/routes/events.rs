//! Event query endpoints.
//!
//! Every handler answers by scanning the log from its earliest retained
//! record through a fresh cursor. Scans block on the broker, so they run on
//! the blocking thread pool; the handler itself only awaits the result.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use common::EventKind;
use serde::{Deserialize, Serialize};
use stream_query::{
    EventScanner, EventSource, ScanError, ScanOptions, collect_stats, event_at_index, random_event,
};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EventSource> {
    pub source: S,
    pub scan: ScanOptions,
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub index: u64,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_flight_schedules: u64,
    pub num_passenger_checkins: u64,
    pub last_updated: String,
}

/// Opens a cursor and drives one selector over it on the blocking pool.
async fn run_scan<S, T, F>(state: &AppState<S>, select: F) -> Result<T, ApiError>
where
    S: EventSource + Clone + 'static,
    T: Send + 'static,
    F: FnOnce(EventScanner<S::Cursor>) -> Result<T, ScanError> + Send + 'static,
{
    let source = state.source.clone();
    let options = state.scan;
    tokio::task::spawn_blocking(move || {
        let cursor = source.open()?;
        select(EventScanner::new(cursor, options))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("scan task failed: {e}")))?
    .map_err(ApiError::from)
}

/// GET /flights/schedule?index=N — the N-th flight schedule in log order.
#[tracing::instrument(skip(state))]
pub async fn schedule_at_index<S: EventSource + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<IndexParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let index = params.index;
    let payload = run_scan(&state, move |scanner| {
        event_at_index(scanner, EventKind::FlightSchedule, index)
    })
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("No flight schedule at index {index}!")))?;

    Ok(Json(payload))
}

/// GET /passenger/checkin?index=N — the N-th passenger check-in in log order.
#[tracing::instrument(skip(state))]
pub async fn checkin_at_index<S: EventSource + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<IndexParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let index = params.index;
    let payload = run_scan(&state, move |scanner| {
        event_at_index(scanner, EventKind::PassengerCheckin, index)
    })
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("No passenger check-in at index {index}!")))?;

    Ok(Json(payload))
}

/// GET /flights/schedule/random — a uniformly random flight schedule.
#[tracing::instrument(skip(state))]
pub async fn random_schedule<S: EventSource + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = run_scan(&state, |scanner| {
        random_event(scanner, EventKind::FlightSchedule)
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("No flight schedules found!".to_string()))?;

    Ok(Json(payload))
}

/// GET /passenger/checkin/random — a uniformly random passenger check-in.
#[tracing::instrument(skip(state))]
pub async fn random_checkin<S: EventSource + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = run_scan(&state, |scanner| {
        random_event(scanner, EventKind::PassengerCheckin)
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("No passenger check-ins found!".to_string()))?;

    Ok(Json(payload))
}

/// GET /stats — aggregate counts of all event kinds from one scan.
#[tracing::instrument(skip(state))]
pub async fn stats<S: EventSource + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = run_scan(&state, collect_stats).await?;

    Ok(Json(StatsResponse {
        num_flight_schedules: stats.count(EventKind::FlightSchedule),
        num_passenger_checkins: stats.count(EventKind::PassengerCheckin),
        last_updated: stats.observed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    }))
}
