use axum::extract::FromRef;
use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::HealthState;

/// Minimal health route of the Observations and Reports gateways.
///
/// ```text
/// GET /health               -> heartbeat
/// ```
pub fn heartbeat_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HealthState: FromRef<S>,
{
    Router::new().route("/health", get(health::heartbeat))
}

/// Composite health and probe routes of the Planning gateway.
///
/// ```text
/// GET /health               -> health_check
/// GET /health/ready         -> readiness
/// GET /health/live          -> liveness
/// ```
pub fn diagnostics_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    HealthState: FromRef<S>,
{
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness))
        .route("/health/live", get(health::liveness))
}
