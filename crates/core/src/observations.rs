//! Observations domain: data validation, pattern analysis and forecasts.
//!
//! Every answer here is canned. [`ObservationsEngine`] is the seam where a
//! real model backend plugs in; [`CannedObservationsEngine`] reproduces the
//! placeholder behaviour the gateway ships with.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::to_strings;
use crate::types::{DbId, JsonMap};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const VALIDATION_CONFIDENCE: f64 = 0.89;
pub const PATTERN_CONFIDENCE: f64 = 0.82;
pub const FORECAST_MODEL_ACCURACY: f64 = 0.91;

/// Suggestion returned when validation found nothing to flag.
pub const DEFAULT_VALIDATION_SUGGESTION: &str = "Data appears normal";

pub const DEFAULT_FORECAST_DAYS: u32 = 7;
pub const MAX_FORECAST_DAYS: u32 = 365;

pub const ANALYSIS_TREND: &str = "trend";
pub const ANALYSIS_ANOMALY: &str = "anomaly";
pub const ANALYSIS_CORRELATION: &str = "correlation";

const VISUALIZATIONS: [&str; 2] = ["trend_chart.png", "anomaly_plot.png"];

// ---------------------------------------------------------------------------
// Validation DTOs
// ---------------------------------------------------------------------------

/// Observation record submitted for validation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DataValidationRequest {
    pub observation_id: DbId,
    /// Named measurements. Only numeric entries are inspected.
    pub data_points: JsonMap,
    /// Expected `{min, max}`-style bounds per measurement. Accepted for
    /// model backends; the canned engine does not apply them.
    #[serde(default)]
    pub expected_ranges: Option<IndexMap<String, IndexMap<String, f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataValidationResponse {
    pub is_valid: bool,
    pub anomalies: Vec<String>,
    pub confidence_score: f64,
    pub suggestions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Pattern analysis DTOs
// ---------------------------------------------------------------------------

/// Analysis mode selected by the `analysis_type` discriminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisType {
    #[default]
    Trend,
    Anomaly,
    Correlation,
    /// Any value outside the known set. Answered with empty findings.
    Unrecognized(String),
}

impl AnalysisType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Trend => ANALYSIS_TREND,
            Self::Anomaly => ANALYSIS_ANOMALY,
            Self::Correlation => ANALYSIS_CORRELATION,
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for AnalysisType {
    fn from(value: String) -> Self {
        match value.as_str() {
            ANALYSIS_TREND => Self::Trend,
            ANALYSIS_ANOMALY => Self::Anomaly,
            ANALYSIS_CORRELATION => Self::Correlation,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<AnalysisType> for String {
    fn from(value: AnalysisType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatternAnalysisRequest {
    pub observations: Vec<JsonMap>,
    #[serde(default)]
    pub analysis_type: AnalysisType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternAnalysisResponse {
    pub patterns: Vec<String>,
    pub insights: Vec<String>,
    pub confidence_score: f64,
    pub visualizations: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Forecast DTOs
// ---------------------------------------------------------------------------

/// Query string of `GET /api/predictions/{observation_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForecastQuery {
    #[serde(default = "default_forecast_days")]
    #[validate(range(min = 1, max = 365))]
    pub forecast_days: u32,
}

fn default_forecast_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub date: String,
    pub value: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationForecast {
    pub observation_id: DbId,
    pub forecast_period: String,
    pub predictions: Vec<Prediction>,
    pub model_accuracy: f64,
    pub factors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Model capabilities behind the Observations gateway.
#[async_trait]
pub trait ObservationsEngine: Send + Sync {
    async fn validate(
        &self,
        request: &DataValidationRequest,
    ) -> Result<DataValidationResponse, CoreError>;

    async fn analyze_patterns(
        &self,
        request: &PatternAnalysisRequest,
    ) -> Result<PatternAnalysisResponse, CoreError>;

    async fn forecast(
        &self,
        observation_id: DbId,
        forecast_days: u32,
    ) -> Result<ObservationForecast, CoreError>;
}

/// Placeholder engine returning fixed, documented answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedObservationsEngine;

#[async_trait]
impl ObservationsEngine for CannedObservationsEngine {
    async fn validate(
        &self,
        request: &DataValidationRequest,
    ) -> Result<DataValidationResponse, CoreError> {
        Ok(validate_data_points(&request.data_points))
    }

    async fn analyze_patterns(
        &self,
        request: &PatternAnalysisRequest,
    ) -> Result<PatternAnalysisResponse, CoreError> {
        Ok(canned_patterns(&request.analysis_type))
    }

    async fn forecast(
        &self,
        observation_id: DbId,
        forecast_days: u32,
    ) -> Result<ObservationForecast, CoreError> {
        Ok(canned_forecast(observation_id, forecast_days))
    }
}

// ---------------------------------------------------------------------------
// Canned logic
// ---------------------------------------------------------------------------

/// Flag every numeric measurement below zero.
///
/// Non-numeric values are skipped. Entries are reported in request order.
pub fn validate_data_points(data_points: &JsonMap) -> DataValidationResponse {
    let mut anomalies = Vec::new();
    let mut suggestions = Vec::new();

    for (key, value) in data_points {
        let serde_json::Value::Number(number) = value else {
            continue;
        };
        if number.as_f64().is_some_and(|v| v < 0.0) {
            anomalies.push(format!("Negative value detected for {key}: {number}"));
            suggestions.push(format!("Verify {key} measurement accuracy"));
        }
    }

    if suggestions.is_empty() {
        suggestions.push(DEFAULT_VALIDATION_SUGGESTION.to_string());
    }

    DataValidationResponse {
        is_valid: anomalies.is_empty(),
        anomalies,
        confidence_score: VALIDATION_CONFIDENCE,
        suggestions,
    }
}

/// Canned (patterns, insights) bundle for an analysis mode.
pub fn canned_patterns(analysis_type: &AnalysisType) -> PatternAnalysisResponse {
    let (patterns, insights): (&[&str], &[&str]) = match analysis_type {
        AnalysisType::Trend => (
            &[
                "Increasing trend detected in temperature readings",
                "Seasonal variation pattern identified",
                "Weekly cyclical behavior observed",
            ],
            &[
                "Temperature shows 2°C increase over last month",
                "Peak values occur on weekends",
                "Consider environmental factors",
            ],
        ),
        AnalysisType::Anomaly => (
            &[
                "3 outlier values detected in dataset",
                "Unusual spike on 2024-01-15",
                "Missing data pattern identified",
            ],
            &[
                "Outliers may indicate equipment malfunction",
                "Spike correlates with maintenance activity",
                "Implement data quality checks",
            ],
        ),
        // No canned correlation findings exist yet.
        AnalysisType::Correlation => (&[], &[]),
        AnalysisType::Unrecognized(raw) => {
            tracing::warn!(analysis_type = %raw, "Unrecognized analysis type, returning empty findings");
            (&[], &[])
        }
    };

    PatternAnalysisResponse {
        patterns: to_strings(patterns),
        insights: to_strings(insights),
        confidence_score: PATTERN_CONFIDENCE,
        visualizations: Some(to_strings(&VISUALIZATIONS)),
    }
}

pub fn canned_forecast(observation_id: DbId, forecast_days: u32) -> ObservationForecast {
    let predictions = [
        ("2024-01-20", 23.5, 0.85),
        ("2024-01-21", 24.1, 0.82),
        ("2024-01-22", 23.8, 0.79),
    ]
    .into_iter()
    .map(|(date, value, confidence)| Prediction {
        date: date.to_string(),
        value,
        confidence,
    })
    .collect();

    ObservationForecast {
        observation_id,
        forecast_period: format!("{forecast_days} days"),
        predictions,
        model_accuracy: FORECAST_MODEL_ACCURACY,
        factors: to_strings(&[
            "Historical trends",
            "Seasonal patterns",
            "External variables",
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn points(value: serde_json::Value) -> JsonMap {
        serde_json::from_value(value).unwrap()
    }

    // -- validate_data_points --

    #[test]
    fn negative_integer_is_flagged() {
        let result = validate_data_points(&points(json!({"temp": -5})));

        assert!(!result.is_valid);
        assert_eq!(result.anomalies, vec!["Negative value detected for temp: -5"]);
        assert_eq!(result.suggestions, vec!["Verify temp measurement accuracy"]);
        assert_eq!(result.confidence_score, 0.89);
    }

    #[test]
    fn negative_float_keeps_its_fraction() {
        let result = validate_data_points(&points(json!({"ph": -2.5})));
        assert_eq!(result.anomalies, vec!["Negative value detected for ph: -2.5"]);
    }

    #[test]
    fn non_negative_values_are_valid_with_default_suggestion() {
        let result = validate_data_points(&points(json!({"temp": 21.5, "count": 0})));

        assert!(result.is_valid);
        assert!(result.anomalies.is_empty());
        assert_eq!(result.suggestions, vec![DEFAULT_VALIDATION_SUGGESTION]);
    }

    #[test]
    fn empty_mapping_is_valid() {
        let result = validate_data_points(&JsonMap::new());
        assert!(result.is_valid);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn non_numeric_values_are_ignored() {
        let result = validate_data_points(&points(json!({
            "label": "-5",
            "flag": true,
            "missing": null,
            "nested": {"x": -1},
        })));
        assert!(result.is_valid);
    }

    #[test]
    fn anomalies_follow_request_order() {
        let result = validate_data_points(&points(json!({"b": -1, "ok": 3, "a": -2})));

        assert_eq!(
            result.anomalies,
            vec![
                "Negative value detected for b: -1",
                "Negative value detected for a: -2",
            ]
        );
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.is_valid, result.anomalies.is_empty());
    }

    // -- AnalysisType --

    #[test]
    fn analysis_type_parses_known_values() {
        assert_eq!(AnalysisType::from("trend".to_string()), AnalysisType::Trend);
        assert_eq!(AnalysisType::from("anomaly".to_string()), AnalysisType::Anomaly);
        assert_eq!(
            AnalysisType::from("correlation".to_string()),
            AnalysisType::Correlation
        );
    }

    #[test]
    fn analysis_type_keeps_unrecognized_value() {
        let parsed = AnalysisType::from("Trend".to_string());
        assert_eq!(parsed, AnalysisType::Unrecognized("Trend".into()));
        assert_eq!(parsed.as_str(), "Trend");
    }

    #[test]
    fn analysis_type_defaults_to_trend_when_omitted() {
        let request: PatternAnalysisRequest =
            serde_json::from_value(json!({"observations": []})).unwrap();
        assert_eq!(request.analysis_type, AnalysisType::Trend);
    }

    // -- canned_patterns --

    #[test]
    fn trend_and_anomaly_return_three_findings_each() {
        for kind in [AnalysisType::Trend, AnalysisType::Anomaly] {
            let result = canned_patterns(&kind);
            assert_eq!(result.patterns.len(), 3);
            assert_eq!(result.insights.len(), 3);
        }
    }

    #[test]
    fn correlation_and_unrecognized_return_empty_findings() {
        for kind in [
            AnalysisType::Correlation,
            AnalysisType::Unrecognized("seasonality".into()),
        ] {
            let result = canned_patterns(&kind);
            assert!(result.patterns.is_empty());
            assert!(result.insights.is_empty());
            assert_eq!(result.confidence_score, PATTERN_CONFIDENCE);
            assert_eq!(
                result.visualizations.as_deref(),
                Some(&["trend_chart.png".to_string(), "anomaly_plot.png".to_string()][..])
            );
        }
    }

    // -- canned_forecast --

    #[test]
    fn forecast_echoes_id_and_period() {
        let forecast = canned_forecast(42, 14);
        assert_eq!(forecast.observation_id, 42);
        assert_eq!(forecast.forecast_period, "14 days");
        assert_eq!(forecast.predictions.len(), 3);
        assert_eq!(forecast.model_accuracy, FORECAST_MODEL_ACCURACY);
    }

    #[test]
    fn forecast_query_defaults_and_bounds() {
        let query: ForecastQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.forecast_days, DEFAULT_FORECAST_DAYS);
        assert!(query.validate().is_ok());

        let query = ForecastQuery {
            forecast_days: MAX_FORECAST_DAYS + 1,
        };
        assert!(query.validate().is_err());
    }

    #[tokio::test]
    async fn canned_engine_delegates_to_pure_functions() {
        let engine = CannedObservationsEngine;
        let request: DataValidationRequest = serde_json::from_value(json!({
            "observation_id": 1,
            "data_points": {"temp": -5}
        }))
        .unwrap();

        let result = engine.validate(&request).await.unwrap();
        assert_eq!(result, validate_data_points(&request.data_points));
    }
}
