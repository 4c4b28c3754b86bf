pub mod health;
pub mod observations;
pub mod planning;
pub mod reports;

use axum::Router;

use crate::state::{ObservationsState, PlanningState, ReportsState};

/// Full route tree of the Observations gateway.
///
/// ```text
/// /health                                   heartbeat
/// /api/validate                             validate (POST)
/// /api/analyze-patterns                     analyze (POST)
/// /api/predictions/{observation_id}         forecast (GET)
/// ```
pub fn observations_routes() -> Router<ObservationsState> {
    Router::new()
        .merge(health::heartbeat_router())
        .nest("/api", observations::observations_router())
}

/// Full route tree of the Planning gateway.
///
/// ```text
/// /health                                   composite report
/// /health/ready                             readiness probe
/// /health/live                              liveness probe
/// /api/suggestions                          suggest (POST)
/// /api/optimize                             optimize (POST)
/// /api/analytics/{plan_id}                  analytics (GET)
/// ```
pub fn planning_routes() -> Router<PlanningState> {
    Router::new()
        .merge(health::diagnostics_router())
        .nest("/api", planning::planning_router())
}

/// Full route tree of the Reports gateway.
///
/// ```text
/// /health                                   heartbeat
/// /api/generate                             generate (POST)
/// /api/insights                             insights (POST)
/// /api/optimize-query                       optimize query (POST)
/// /api/templates                            template catalog (GET)
/// ```
pub fn reports_routes() -> Router<ReportsState> {
    Router::new()
        .merge(health::heartbeat_router())
        .nest("/api", reports::reports_router())
}
