//! Planning domain: plan suggestions, plan optimization and plan analytics.
//!
//! The shipped [`CannedPlanningEngine`] answers from string templates; a
//! real model backend implements [`PlanningEngine`] instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::to_strings;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SUGGESTION_CONFIDENCE: f64 = 0.85;
pub const OPTIMIZATION_EFFICIENCY: f64 = 0.92;
pub const COMPLETION_PROBABILITY: f64 = 0.78;

/// Priority recommended for every plan (1 = high, 3 = low).
pub const DEFAULT_PRIORITY: i32 = 2;
pub const DEFAULT_DURATION_ESTIMATE: &str = "2-4 weeks";

/// Prefix applied to every optimized plan item.
pub const OPTIMIZED_PREFIX: &str = "Optimized: ";

/// Suggestions that follow the title-specific one.
const BASE_SUGGESTIONS: [&str; 3] = [
    "Set clear milestones and deadlines",
    "Identify potential risks and mitigation strategies",
    "Allocate resources and assign responsibilities",
];

const BASE_RECOMMENDATIONS: [&str; 3] = [
    "Consider parallel execution of independent tasks",
    "Identify critical path dependencies",
    "Optimize resource allocation",
];

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanSuggestionRequest {
    pub title: String,
    pub description: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSuggestionResponse {
    pub suggestions: Vec<String>,
    pub estimated_duration: Option<String>,
    pub priority_recommendation: i32,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanOptimizationRequest {
    pub plan_id: DbId,
    pub current_items: Vec<String>,
    pub constraints: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOptimizationResponse {
    pub optimized_items: Vec<String>,
    pub recommendations: Vec<String>,
    pub efficiency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanAnalytics {
    pub plan_id: DbId,
    pub completion_probability: f64,
    pub risk_factors: Vec<String>,
    pub success_indicators: Vec<String>,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Model capabilities behind the Planning gateway.
#[async_trait]
pub trait PlanningEngine: Send + Sync {
    async fn suggest(
        &self,
        request: &PlanSuggestionRequest,
    ) -> Result<PlanSuggestionResponse, CoreError>;

    async fn optimize(
        &self,
        request: &PlanOptimizationRequest,
    ) -> Result<PlanOptimizationResponse, CoreError>;

    async fn analytics(&self, plan_id: DbId) -> Result<PlanAnalytics, CoreError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedPlanningEngine;

#[async_trait]
impl PlanningEngine for CannedPlanningEngine {
    async fn suggest(
        &self,
        request: &PlanSuggestionRequest,
    ) -> Result<PlanSuggestionResponse, CoreError> {
        Ok(suggest_for(&request.title, request.context.as_deref()))
    }

    async fn optimize(
        &self,
        request: &PlanOptimizationRequest,
    ) -> Result<PlanOptimizationResponse, CoreError> {
        Ok(optimize_items(
            &request.current_items,
            request.constraints.as_deref(),
        ))
    }

    async fn analytics(&self, plan_id: DbId) -> Result<PlanAnalytics, CoreError> {
        Ok(canned_analytics(plan_id))
    }
}

// ---------------------------------------------------------------------------
// Canned logic
// ---------------------------------------------------------------------------

/// Four generic suggestions, plus one echoing `context` when it is non-empty.
pub fn suggest_for(title: &str, context: Option<&str>) -> PlanSuggestionResponse {
    let mut suggestions = Vec::with_capacity(BASE_SUGGESTIONS.len() + 2);
    suggestions.push(format!(
        "Break down '{title}' into smaller, manageable tasks"
    ));
    suggestions.extend(BASE_SUGGESTIONS.iter().map(|s| s.to_string()));

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        suggestions.push(format!("Consider context: {context}"));
    }

    PlanSuggestionResponse {
        suggestions,
        estimated_duration: Some(DEFAULT_DURATION_ESTIMATE.to_string()),
        priority_recommendation: DEFAULT_PRIORITY,
        confidence_score: SUGGESTION_CONFIDENCE,
    }
}

/// Prefix each item 1:1, preserving order.
pub fn optimize_items(items: &[String], constraints: Option<&[String]>) -> PlanOptimizationResponse {
    let optimized_items = items
        .iter()
        .map(|item| format!("{OPTIMIZED_PREFIX}{item}"))
        .collect();

    let mut recommendations = to_strings(&BASE_RECOMMENDATIONS);
    if let Some(constraints) = constraints.filter(|c| !c.is_empty()) {
        recommendations.push(format!("Applied constraints: {}", constraints.join(", ")));
    }

    PlanOptimizationResponse {
        optimized_items,
        recommendations,
        efficiency_score: OPTIMIZATION_EFFICIENCY,
    }
}

pub fn canned_analytics(plan_id: DbId) -> PlanAnalytics {
    PlanAnalytics {
        plan_id,
        completion_probability: COMPLETION_PROBABILITY,
        risk_factors: to_strings(&["Resource constraints", "Timeline pressure"]),
        success_indicators: to_strings(&["Clear milestones", "Engaged team"]),
        recommendations: to_strings(&[
            "Add buffer time for critical tasks",
            "Increase communication frequency",
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
