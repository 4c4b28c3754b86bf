use std::sync::Arc;

use axum::extract::FromRef;
use mapp_genai_core::gateway::Gateway;
use mapp_genai_core::observations::ObservationsEngine;
use mapp_genai_core::planning::PlanningEngine;
use mapp_genai_core::reports::ReportsEngine;
use mapp_genai_core::settings::Settings;

use crate::diagnostics::Diagnostics;

/// State shared by the health routes of every gateway.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Copy`).
#[derive(Clone)]
pub struct HealthState {
    /// Which gateway this process is.
    pub gateway: Gateway,
    /// Settings resolved at startup. Never mutated.
    pub settings: Arc<Settings>,
    /// Process and dependency probes.
    pub diagnostics: Arc<Diagnostics>,
}

/// State of the Observations gateway.
#[derive(Clone, FromRef)]
pub struct ObservationsState {
    pub health: HealthState,
    pub engine: Arc<dyn ObservationsEngine>,
}

/// State of the Planning gateway.
#[derive(Clone, FromRef)]
pub struct PlanningState {
    pub health: HealthState,
    pub engine: Arc<dyn PlanningEngine>,
}

/// State of the Reports gateway.
#[derive(Clone, FromRef)]
pub struct ReportsState {
    pub health: HealthState,
    pub engine: Arc<dyn ReportsEngine>,
}
