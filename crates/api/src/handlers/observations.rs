//! Handlers for the Observations gateway.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use mapp_genai_core::observations::{
    DataValidationRequest, DataValidationResponse, ForecastQuery, ObservationForecast,
    ObservationsEngine, PatternAnalysisRequest, PatternAnalysisResponse,
};
use mapp_genai_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiPath, ValidatedJson, ValidatedQuery};

// ---------------------------------------------------------------------------
// POST /api/validate
// ---------------------------------------------------------------------------

/// Flag anomalous measurements in one observation record.
pub async fn validate_data(
    State(engine): State<Arc<dyn ObservationsEngine>>,
    ValidatedJson(body): ValidatedJson<DataValidationRequest>,
) -> AppResult<Json<DataValidationResponse>> {
    let result = engine.validate(&body).await?;

    tracing::info!(
        observation_id = body.observation_id,
        data_points = body.data_points.len(),
        is_valid = result.is_valid,
        anomalies = result.anomalies.len(),
        "Observation data validated",
    );

    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// POST /api/analyze-patterns
// ---------------------------------------------------------------------------

pub async fn analyze_patterns(
    State(engine): State<Arc<dyn ObservationsEngine>>,
    ValidatedJson(body): ValidatedJson<PatternAnalysisRequest>,
) -> AppResult<Json<PatternAnalysisResponse>> {
    let result = engine.analyze_patterns(&body).await?;

    tracing::info!(
        analysis_type = body.analysis_type.as_str(),
        observations = body.observations.len(),
        patterns = result.patterns.len(),
        "Patterns analyzed",
    );

    Ok(Json(result))
}

// ---------------------------------------------------------------------------
// GET /api/predictions/{observation_id}
// ---------------------------------------------------------------------------

/// Forecast the next `forecast_days` values of an observation series.
pub async fn predict_trends(
    State(engine): State<Arc<dyn ObservationsEngine>>,
    ApiPath(observation_id): ApiPath<DbId>,
    ValidatedQuery(query): ValidatedQuery<ForecastQuery>,
) -> AppResult<Json<ObservationForecast>> {
    let forecast = engine.forecast(observation_id, query.forecast_days).await?;

    tracing::info!(
        observation_id,
        forecast_days = query.forecast_days,
        "Forecast produced",
    );

    Ok(Json(forecast))
}
