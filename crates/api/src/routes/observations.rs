//! Route definitions for the Observations gateway.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::observations;
use crate::state::ObservationsState;

/// Observations routes mounted at `/api`.
///
/// ```text
/// POST /validate                          -> validate_data
/// POST /analyze-patterns                  -> analyze_patterns
/// GET  /predictions/{observation_id}      -> predict_trends (?forecast_days=7)
/// ```
pub fn observations_router() -> Router<ObservationsState> {
    Router::new()
        .route("/validate", post(observations::validate_data))
        .route("/analyze-patterns", post(observations::analyze_patterns))
        .route(
            "/predictions/{observation_id}",
            get(observations::predict_trends),
        )
}
