#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mapp_genai_api::diagnostics::Diagnostics;
use mapp_genai_api::router::{apply_middleware, build_app};
use mapp_genai_api::state::HealthState;
use mapp_genai_core::gateway::Gateway;
use mapp_genai_core::settings::Settings;
use serde_json::Value;
use tower::ServiceExt;

/// Request timeout used by every test router.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build `Settings` for `gateway` from the given variables only; the real
/// process environment is never consulted.
pub fn test_settings(gateway: Gateway, vars: &[(&str, &str)]) -> Settings {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Settings::from_lookup(gateway.default_port(), move |key| vars.get(key).cloned())
        .expect("test settings should be valid")
}

/// HTTP client for dependency pings; ignores any proxy in the environment so
/// loopback upstreams are reached directly.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Build the full gateway router with default settings.
pub fn build_test_app(gateway: Gateway) -> Router {
    build_test_app_with(gateway, &[])
}

/// Build the full gateway router with the given environment variables.
///
/// This goes through the same [`build_app`] the binaries use, so tests
/// exercise the production middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery).
pub fn build_test_app_with(gateway: Gateway, vars: &[(&str, &str)]) -> Router {
    let settings = Arc::new(test_settings(gateway, vars));
    build_app(gateway, settings, test_client())
}

/// Health state for routers assembled by hand (custom engines).
pub fn test_health_state(gateway: Gateway) -> HealthState {
    let settings = Arc::new(test_settings(gateway, &[]));
    HealthState {
        gateway,
        diagnostics: Arc::new(Diagnostics::new(test_client(), &settings)),
        settings,
    }
}

/// Wrap a hand-assembled router in the production middleware stack.
pub fn with_middleware(app: Router) -> Router {
    apply_middleware(app, TEST_TIMEOUT)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an arbitrary body, optionally without a content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: &'static str,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
