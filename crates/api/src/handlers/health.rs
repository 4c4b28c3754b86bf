//! Health handlers shared by all three gateways.
//!
//! Observations and Reports serve [`heartbeat`] only; Planning serves the
//! composite [`health_check`] plus the two narrow probes.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use mapp_genai_core::health::{Heartbeat, ProbeResponse, UnhealthyReport};

use crate::state::HealthState;

/// GET /health -- minimal liveness payload.
pub async fn heartbeat(State(health): State<HealthState>) -> Json<Heartbeat> {
    Json(Heartbeat::new(health.gateway, Utc::now()))
}

/// GET /health -- composite report with process and dependency checks.
///
/// Always answers 200; the verdict lives in the body. When the check itself
/// fails the caller only sees an opaque reference to the logged detail.
pub async fn health_check(State(health): State<HealthState>) -> Response {
    match health
        .diagnostics
        .report(health.gateway, &health.settings.environment)
        .await
    {
        Ok(report) => {
            tracing::debug!(status = ?report.status, "Health check completed");
            Json(report).into_response()
        }
        Err(e) => {
            let reference = uuid::Uuid::new_v4().to_string();
            tracing::error!(error = %e, %reference, "Health check failed");
            Json(UnhealthyReport::new(health.gateway, reference, Utc::now())).into_response()
        }
    }
}

/// GET /health/ready
pub async fn readiness(State(health): State<HealthState>) -> Json<ProbeResponse> {
    Json(ProbeResponse::ready(health.gateway))
}

/// GET /health/live
pub async fn liveness(State(health): State<HealthState>) -> Json<ProbeResponse> {
    Json(ProbeResponse::alive(health.gateway))
}
