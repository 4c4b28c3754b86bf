//! Handlers for the Reports gateway.
//!
//! Report generation only mints an identifier; no artifact is produced and
//! nothing serves the returned download URL yet.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use mapp_genai_core::reports::{
    InsightRequest, InsightResponse, QueryOptimizationRequest, QueryOptimizationResponse,
    ReportGenerationRequest, ReportGenerationResponse, ReportsEngine, TemplateCatalog,
};

use crate::error::AppResult;
use crate::extract::ValidatedJson;

// ---------------------------------------------------------------------------
// POST /api/generate
// ---------------------------------------------------------------------------

pub async fn generate_report(
    State(engine): State<Arc<dyn ReportsEngine>>,
    ValidatedJson(body): ValidatedJson<ReportGenerationRequest>,
) -> AppResult<Json<ReportGenerationResponse>> {
    let accepted = engine.generate(&body, Utc::now()).await?;

    tracing::info!(
        report_id = %accepted.report_id,
        report_type = %body.report_type,
        format = ?body.format,
        data_sources = body.data_sources.len(),
        "Report generation accepted",
    );

    Ok(Json(accepted))
}

// ---------------------------------------------------------------------------
// POST /api/insights
// ---------------------------------------------------------------------------

pub async fn generate_insights(
    State(engine): State<Arc<dyn ReportsEngine>>,
    ValidatedJson(body): ValidatedJson<InsightRequest>,
) -> AppResult<Json<InsightResponse>> {
    let result = engine.insights(&body).await?;

    tracing::info!(
        insight_type = body.insight_type.as_str(),
        insights = result.insights.len(),
        "Insights generated",
    );

    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// POST /api/optimize-query
// ---------------------------------------------------------------------------

pub async fn optimize_query(
    State(engine): State<Arc<dyn ReportsEngine>>,
    ValidatedJson(body): ValidatedJson<QueryOptimizationRequest>,
) -> AppResult<Json<QueryOptimizationResponse>> {
    let result = engine.optimize_query(&body).await?;

    tracing::info!(
        rewritten = result.optimized_query != body.sql_query,
        performance_target = body.performance_target.as_deref(),
        "Query optimized",
    );

    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// GET /api/templates
// ---------------------------------------------------------------------------

pub async fn list_templates(
    State(engine): State<Arc<dyn ReportsEngine>>,
) -> AppResult<Json<TemplateCatalog>> {
    Ok(Json(engine.templates().await?))
}
