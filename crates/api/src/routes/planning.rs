//! Route definitions for the Planning gateway.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::planning;
use crate::state::PlanningState;

/// Planning routes mounted at `/api`.
///
/// ```text
/// POST /suggestions               -> generate_suggestions
/// POST /optimize                  -> optimize_plan
/// GET  /analytics/{plan_id}       -> plan_analytics
/// ```
pub fn planning_router() -> Router<PlanningState> {
    Router::new()
        .route("/suggestions", post(planning::generate_suggestions))
        .route("/optimize", post(planning::optimize_plan))
        .route("/analytics/{plan_id}", get(planning::plan_analytics))
}
