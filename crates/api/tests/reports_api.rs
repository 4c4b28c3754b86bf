//! HTTP-level integration tests for the Reports gateway.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use mapp_genai_core::gateway::Gateway;
use serde_json::json;

fn app() -> axum::Router {
    build_test_app(Gateway::Reports)
}

// ---------------------------------------------------------------------------
// Test: POST /api/generate mints an id and a download URL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_accepts_report() {
    let response = post_json(
        app(),
        "/api/generate",
        json!({
            "report_type": "quarterly",
            "data_sources": ["plans", "observations"],
            "parameters": {"quarter": "Q1"},
            "format": "html",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let report_id = json["report_id"].as_str().unwrap();
    assert!(report_id.starts_with("RPT_"));
    assert_eq!(report_id.len(), "RPT_20240101_120000".len());
    assert_eq!(json["status"], "processing");
    assert_eq!(json["download_url"], format!("/api/download/{report_id}"));
    assert_eq!(json["estimated_completion"], "2-5 minutes");
}

#[tokio::test]
async fn generate_defaults_format() {
    let response = post_json(
        app(),
        "/api/generate",
        json!({"report_type": "summary", "data_sources": [], "parameters": {}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generate_accepts_empty_report_type() {
    let response = post_json(
        app(),
        "/api/generate",
        json!({"report_type": "", "data_sources": [], "parameters": {}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "processing");
}

// ---------------------------------------------------------------------------
// Test: POST /api/insights dispatches on insight_type
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insights_default_to_summary() {
    let response = post_json(app(), "/api/insights", json!({"data": {"plans": 3}})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["insights"].as_array().unwrap().len(), 3);
    assert_eq!(json["key_metrics"]["total_plans"], 1250);
    assert_eq!(json["key_metrics"]["report_generation_time"], "2.3s");
    assert_eq!(json["confidence_score"], 0.87);
}

#[tokio::test]
async fn insights_trends_have_no_metrics() {
    let response = post_json(
        app(),
        "/api/insights",
        json!({"data": {}, "insight_type": "trends", "context": "weekly"}),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["insights"][0], "Upward trend in plan completion rates");
    assert_eq!(json["key_metrics"], json!({}));
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn insights_unrecognized_type_returns_empty_collections() {
    let response = post_json(
        app(),
        "/api/insights",
        json!({"data": {}, "insight_type": "forecast"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["insights"].as_array().unwrap().is_empty());
    assert_eq!(json["key_metrics"], json!({}));
    assert!(json["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(json["confidence_score"], 0.87);
}

// ---------------------------------------------------------------------------
// Test: POST /api/optimize-query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn optimize_query_replaces_wildcard_select() {
    let response = post_json(
        app(),
        "/api/optimize-query",
        json!({"sql_query": "SELECT * FROM plans WHERE id = 1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["optimized_query"],
        "SELECT id, name, status FROM plans WHERE id = 1"
    );
    assert_eq!(json["performance_improvement"], "45% faster execution");
    assert_eq!(json["estimated_execution_time"], "1.2 seconds");
}

#[tokio::test]
async fn optimize_query_leaves_explicit_columns_alone() {
    let query = "SELECT name FROM reports";
    let response = post_json(
        app(),
        "/api/optimize-query",
        json!({"sql_query": query, "expected_result_size": 10, "performance_target": "fast"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["optimized_query"], query);
}

#[tokio::test]
async fn optimize_query_returns_empty_query_unchanged() {
    let response = post_json(app(), "/api/optimize-query", json!({"sql_query": ""})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["optimized_query"], "");
}

// ---------------------------------------------------------------------------
// Test: GET /api/templates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn templates_lists_catalog() {
    let response = get(app(), "/api/templates").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<&str> = json["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        ["executive_summary", "operational_dashboard", "compliance_report"]
    );
    assert_eq!(json["templates"][1]["ai_features"][0], "Anomaly detection");
}

#[tokio::test]
async fn heartbeat_reports_service_name() {
    let response = get(app(), "/health").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "reports-ai");
}
