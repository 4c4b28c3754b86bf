//! Handlers for the Planning gateway.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use mapp_genai_core::planning::{
    PlanAnalytics, PlanOptimizationRequest, PlanOptimizationResponse, PlanSuggestionRequest,
    PlanSuggestionResponse, PlanningEngine,
};
use mapp_genai_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiPath, ValidatedJson};

/// POST /api/suggestions -- planning suggestions for a titled plan.
pub async fn generate_suggestions(
    State(engine): State<Arc<dyn PlanningEngine>>,
    ValidatedJson(body): ValidatedJson<PlanSuggestionRequest>,
) -> AppResult<Json<PlanSuggestionResponse>> {
    let result = engine.suggest(&body).await?;

    tracing::info!(
        title = %body.title,
        has_context = body.context.is_some(),
        suggestions = result.suggestions.len(),
        "Plan suggestions generated",
    );

    Ok(Json(result))
}

/// POST /api/optimize -- rewrite plan items under optional constraints.
pub async fn optimize_plan(
    State(engine): State<Arc<dyn PlanningEngine>>,
    ValidatedJson(body): ValidatedJson<PlanOptimizationRequest>,
) -> AppResult<Json<PlanOptimizationResponse>> {
    let result = engine.optimize(&body).await?;

    tracing::info!(
        plan_id = body.plan_id,
        items = body.current_items.len(),
        constraints = body.constraints.as_ref().map_or(0, Vec::len),
        "Plan optimized",
    );

    Ok(Json(result))
}

/// GET /api/analytics/{plan_id}
pub async fn plan_analytics(
    State(engine): State<Arc<dyn PlanningEngine>>,
    ApiPath(plan_id): ApiPath<DbId>,
) -> AppResult<Json<PlanAnalytics>> {
    let analytics = engine.analytics(plan_id).await?;
    tracing::debug!(plan_id, "Plan analytics served");
    Ok(Json(analytics))
}
