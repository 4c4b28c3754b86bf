//! Gateway router builders.
//!
//! Provides [`build_app`] so the three binaries and the integration tests
//! (`tests/common/mod.rs`) share the exact same middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, StatusCode};
use axum::Router;
use mapp_genai_core::gateway::Gateway;
use mapp_genai_core::observations::CannedObservationsEngine;
use mapp_genai_core::planning::CannedPlanningEngine;
use mapp_genai_core::reports::CannedReportsEngine;
use mapp_genai_core::settings::Settings;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::diagnostics::Diagnostics;
use crate::routes;
use crate::state::{HealthState, ObservationsState, PlanningState, ReportsState};

/// Build the router of `gateway`, backed by the canned engines.
pub fn build_app(gateway: Gateway, settings: Arc<Settings>, client: reqwest::Client) -> Router {
    let timeout = Duration::from_secs(settings.timeout_seconds);
    let health = HealthState {
        gateway,
        diagnostics: Arc::new(Diagnostics::new(client, &settings)),
        settings,
    };

    let app = match gateway {
        Gateway::Observations => routes::observations_routes().with_state(ObservationsState {
            health,
            engine: Arc::new(CannedObservationsEngine),
        }),
        Gateway::Planning => routes::planning_routes().with_state(PlanningState {
            health,
            engine: Arc::new(CannedPlanningEngine),
        }),
        Gateway::Reports => routes::reports_routes().with_state(ReportsState {
            health,
            engine: Arc::new(CannedReportsEngine),
        }),
    };

    apply_middleware(app, timeout)
}

/// Wrap a stateless router in the common middleware stack.
///
/// The stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout
/// 6. Panic recovery (catch panics, return 500)
pub fn apply_middleware(app: Router, request_timeout: Duration) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer())
}

/// Fully open CORS: any origin, method and header, no credentials.
///
/// Tighten per deployment by putting a proxy in front of the gateway.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}
