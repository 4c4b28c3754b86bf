//! Route definitions for the Reports gateway.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::ReportsState;

/// Reports routes mounted at `/api`.
///
/// ```text
/// POST /generate            -> generate_report
/// POST /insights            -> generate_insights
/// POST /optimize-query      -> optimize_query
/// GET  /templates           -> list_templates
/// ```
pub fn reports_router() -> Router<ReportsState> {
    Router::new()
        .route("/generate", post(reports::generate_report))
        .route("/insights", post(reports::generate_insights))
        .route("/optimize-query", post(reports::optimize_query))
        .route("/templates", get(reports::list_templates))
}
