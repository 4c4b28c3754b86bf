//! HTTP-level integration tests for the Planning gateway's `/api` routes.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use mapp_genai_core::gateway::Gateway;
use serde_json::json;

fn app() -> axum::Router {
    build_test_app(Gateway::Planning)
}

// ---------------------------------------------------------------------------
// Test: POST /api/suggestions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suggestions_without_context_have_four_entries() {
    let response = post_json(
        app(),
        "/api/suggestions",
        json!({"title": "Site survey", "description": "Spring campaign"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 4);
    assert_eq!(
        suggestions[0],
        "Break down 'Site survey' into smaller, manageable tasks"
    );
    assert_eq!(json["estimated_duration"], "2-4 weeks");
    assert_eq!(json["priority_recommendation"], 2);
    assert_eq!(json["confidence_score"], 0.85);
}

#[tokio::test]
async fn suggestions_echo_context_last() {
    let response = post_json(
        app(),
        "/api/suggestions",
        json!({"title": "Site survey", "context": "budget is tight"}),
    )
    .await;
    let json = body_json(response).await;

    let suggestions = json["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 5);
    assert_eq!(suggestions[4], "Consider context: budget is tight");
}

#[tokio::test]
async fn suggestions_ignore_empty_context() {
    let response = post_json(
        app(),
        "/api/suggestions",
        json!({"title": "Site survey", "context": ""}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn suggestions_accept_empty_title() {
    let response = post_json(app(), "/api/suggestions", json!({"title": ""})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["suggestions"][0],
        "Break down '' into smaller, manageable tasks"
    );
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Test: POST /api/optimize
// ---------------------------------------------------------------------------

#[tokio::test]
async fn optimize_prefixes_items_in_order() {
    let response = post_json(
        app(),
        "/api/optimize",
        json!({"plan_id": 9, "current_items": ["dig", "fill", "dig"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["optimized_items"],
        json!(["Optimized: dig", "Optimized: fill", "Optimized: dig"])
    );
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(json["efficiency_score"], 0.92);
}

#[tokio::test]
async fn optimize_echoes_constraints() {
    let response = post_json(
        app(),
        "/api/optimize",
        json!({
            "plan_id": 9,
            "current_items": [],
            "constraints": ["no overtime", "two crews"],
        }),
    )
    .await;
    let json = body_json(response).await;

    assert!(json["optimized_items"].as_array().unwrap().is_empty());
    let recommendations = json["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 4);
    assert_eq!(
        recommendations[3],
        "Applied constraints: no overtime, two crews"
    );
}

// ---------------------------------------------------------------------------
// Test: GET /api/analytics/{plan_id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analytics_echoes_plan_id() {
    let response = get(app(), "/api/analytics/42").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["plan_id"], 42);
    assert_eq!(json["completion_probability"], 0.78);
    assert_eq!(
        json["risk_factors"],
        json!(["Resource constraints", "Timeline pressure"])
    );
}
