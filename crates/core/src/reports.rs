//! Reports domain: report scheduling, insight bundles, query rewriting and
//! the report template catalog.
//!
//! No report artifact is ever produced. [`mint_report_id`] only derives an
//! identifier from the request time.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::CoreError;
use crate::to_strings;
use crate::types::{JsonMap, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const INSIGHT_CONFIDENCE: f64 = 0.87;

pub const REPORT_ID_PREFIX: &str = "RPT_";
/// `chrono` format of the timestamp part of a report id (second precision).
pub const REPORT_ID_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const ESTIMATED_COMPLETION: &str = "2-5 minutes";

pub const WILDCARD_SELECT: &str = "SELECT *";
pub const EXPLICIT_SELECT: &str = "SELECT id, name, status";

pub const INSIGHT_SUMMARY: &str = "summary";
pub const INSIGHT_TRENDS: &str = "trends";
pub const INSIGHT_RECOMMENDATIONS: &str = "recommendations";

// ---------------------------------------------------------------------------
// Report generation
// ---------------------------------------------------------------------------

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Excel,
    Html,
}

/// Lifecycle state reported for a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Accepted. No background job exists behind this state yet.
    Processing,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportGenerationRequest {
    pub report_type: String,
    pub data_sources: Vec<String>,
    pub parameters: JsonMap,
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportGenerationResponse {
    pub report_id: String,
    pub status: ReportStatus,
    pub download_url: Option<String>,
    pub estimated_completion: Option<String>,
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Insight bundle selected by the `insight_type` discriminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InsightType {
    #[default]
    Summary,
    Trends,
    Recommendations,
    /// Any value outside the known set. Answered with empty collections.
    Unrecognized(String),
}

impl InsightType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Summary => INSIGHT_SUMMARY,
            Self::Trends => INSIGHT_TRENDS,
            Self::Recommendations => INSIGHT_RECOMMENDATIONS,
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for InsightType {
    fn from(value: String) -> Self {
        match value.as_str() {
            INSIGHT_SUMMARY => Self::Summary,
            INSIGHT_TRENDS => Self::Trends,
            INSIGHT_RECOMMENDATIONS => Self::Recommendations,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<InsightType> for String {
    fn from(value: InsightType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InsightRequest {
    pub data: JsonMap,
    pub context: Option<String>,
    #[serde(default)]
    pub insight_type: InsightType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResponse {
    pub insights: Vec<String>,
    pub key_metrics: JsonMap,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
}

// ---------------------------------------------------------------------------
// Query optimization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QueryOptimizationRequest {
    pub sql_query: String,
    pub expected_result_size: Option<i64>,
    pub performance_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOptimizationResponse {
    pub optimized_query: String,
    pub performance_improvement: String,
    pub explanation: Vec<String>,
    pub estimated_execution_time: String,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub ai_features: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCatalog {
    pub templates: Vec<ReportTemplate>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Model capabilities behind the Reports gateway.
#[async_trait]
pub trait ReportsEngine: Send + Sync {
    /// Accept a report request received at `requested_at`.
    async fn generate(
        &self,
        request: &ReportGenerationRequest,
        requested_at: Timestamp,
    ) -> Result<ReportGenerationResponse, CoreError>;

    async fn insights(&self, request: &InsightRequest) -> Result<InsightResponse, CoreError>;

    async fn optimize_query(
        &self,
        request: &QueryOptimizationRequest,
    ) -> Result<QueryOptimizationResponse, CoreError>;

    async fn templates(&self) -> Result<TemplateCatalog, CoreError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedReportsEngine;

#[async_trait]
impl ReportsEngine for CannedReportsEngine {
    async fn generate(
        &self,
        _request: &ReportGenerationRequest,
        requested_at: Timestamp,
    ) -> Result<ReportGenerationResponse, CoreError> {
        Ok(accept_report(requested_at))
    }

    async fn insights(&self, request: &InsightRequest) -> Result<InsightResponse, CoreError> {
        Ok(canned_insights(&request.insight_type))
    }

    async fn optimize_query(
        &self,
        request: &QueryOptimizationRequest,
    ) -> Result<QueryOptimizationResponse, CoreError> {
        Ok(rewrite_query(&request.sql_query))
    }

    async fn templates(&self) -> Result<TemplateCatalog, CoreError> {
        Ok(template_catalog())
    }
}

// ---------------------------------------------------------------------------
// Canned logic
// ---------------------------------------------------------------------------

/// `RPT_` followed by the UTC time to the second.
///
/// Two ids minted within the same second are identical.
pub fn mint_report_id(requested_at: Timestamp) -> String {
    format!(
        "{REPORT_ID_PREFIX}{}",
        requested_at.format(REPORT_ID_TIME_FORMAT)
    )
}

pub fn accept_report(requested_at: Timestamp) -> ReportGenerationResponse {
    let report_id = mint_report_id(requested_at);
    ReportGenerationResponse {
        download_url: Some(format!("/api/download/{report_id}")),
        report_id,
        status: ReportStatus::Processing,
        estimated_completion: Some(ESTIMATED_COMPLETION.to_string()),
    }
}

pub fn canned_insights(insight_type: &InsightType) -> InsightResponse {
    let (insights, key_metrics, recommendations) = match insight_type {
        InsightType::Summary => (
            to_strings(&[
                "Overall performance shows 15% improvement over last quarter",
                "Key growth areas identified in planning and observations",
                "User engagement metrics exceed targets by 23%",
            ]),
            JsonMap::from([
                ("total_plans".to_string(), json!(1250)),
                ("completed_observations".to_string(), json!(3400)),
                ("active_users".to_string(), json!(89)),
                ("report_generation_time".to_string(), json!("2.3s")),
            ]),
            to_strings(&[
                "Focus on scaling successful planning strategies",
                "Implement automated observation validation",
                "Enhance user onboarding process",
            ]),
        ),
        InsightType::Trends => (
            to_strings(&[
                "Upward trend in plan completion rates",
                "Seasonal patterns detected in observation data",
                "Report usage peaks on Monday mornings",
            ]),
            JsonMap::new(),
            to_strings(&[
                "Optimize system performance for Monday peak loads",
                "Prepare seasonal observation templates",
                "Implement predictive plan success scoring",
            ]),
        ),
        // No canned recommendation bundle exists yet.
        InsightType::Recommendations => (Vec::new(), JsonMap::new(), Vec::new()),
        InsightType::Unrecognized(raw) => {
            tracing::warn!(insight_type = %raw, "Unrecognized insight type, returning empty insights");
            (Vec::new(), JsonMap::new(), Vec::new())
        }
    };

    InsightResponse {
        insights,
        key_metrics,
        recommendations,
        confidence_score: INSIGHT_CONFIDENCE,
    }
}

/// Replace every `SELECT *` with an explicit column list.
///
/// A literal substring replacement; the query is not parsed.
pub fn rewrite_query(sql_query: &str) -> QueryOptimizationResponse {
    QueryOptimizationResponse {
        optimized_query: sql_query.replace(WILDCARD_SELECT, EXPLICIT_SELECT),
        performance_improvement: "45% faster execution".to_string(),
        explanation: to_strings(&[
            "Replaced SELECT * with specific columns",
            "Added appropriate indexes suggestion",
            "Optimized JOIN order for better performance",
        ]),
        estimated_execution_time: "1.2 seconds".to_string(),
    }
}

pub fn template_catalog() -> TemplateCatalog {
    TemplateCatalog {
        templates: vec![
            ReportTemplate {
                id: "executive_summary",
                name: "Executive Summary",
                description: "High-level overview with key metrics and insights",
                ai_features: vec!["Auto-insights", "Trend analysis", "Recommendations"],
            },
            ReportTemplate {
                id: "operational_dashboard",
                name: "Operational Dashboard",
                description: "Real-time operational metrics and alerts",
                ai_features: vec![
                    "Anomaly detection",
                    "Predictive alerts",
                    "Performance optimization",
                ],
            },
            ReportTemplate {
                id: "compliance_report",
                name: "Compliance Report",
                description: "Regulatory compliance tracking and reporting",
                ai_features: vec!["Risk assessment", "Gap analysis", "Remediation suggestions"],
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
