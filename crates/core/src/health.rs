//! Health report types and the composite status rule.
//!
//! Gathering the inputs (process introspection, dependency pings) is the
//! API crate's job. This module only shapes the payloads and decides the
//! overall status from what was gathered.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::gateway::Gateway;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Placeholder rendered for a measurement that could not be taken.
pub const UNKNOWN: &str = "unknown";

pub const DEPENDENCY_PLANNING_API: &str = "planning_api";
pub const DEPENDENCY_DATABASE: &str = "database";

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Why a dependency check could not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyFailure {
    /// No answer within the check's time bound.
    Timeout,
    /// Connection refused, DNS failure and the like.
    Unreachable,
    /// Any other client-side request failure.
    Request,
}

impl DependencyFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Unreachable => "unreachable",
            Self::Request => "request_failed",
        }
    }
}

/// Result of checking one external dependency.
///
/// Serialized as a plain string (`"healthy"`, `"error: timeout"`, ...).
/// Error variants carry only a category; diagnostic detail is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyStatus {
    Healthy,
    /// Reachable but answered with a non-success status.
    Degraded,
    Error(DependencyFailure),
    NotConfigured,
    /// Configured, but no check exists for it yet.
    NotImplemented,
}

impl DependencyStatus {
    /// Whether this status escalates the composite report to degraded.
    pub fn is_failing(self) -> bool {
        matches!(self, Self::Degraded | Self::Error(_))
    }

    pub fn label(self) -> String {
        match self {
            Self::Healthy => "healthy".into(),
            Self::Degraded => "degraded".into(),
            Self::Error(failure) => format!("error: {}", failure.as_str()),
            Self::NotConfigured => "not_configured".into(),
            Self::NotImplemented => "not_implemented".into(),
        }
    }
}

impl Serialize for DependencyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// A process measurement rounded to two decimals, or `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement(Option<f64>);

impl Measurement {
    pub fn known(value: f64) -> Self {
        Self(Some((value * 100.0).round() / 100.0))
    }

    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Memory and uptime of the running gateway process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSnapshot {
    pub memory_usage_mb: Measurement,
    pub uptime_seconds: Measurement,
}

impl ProcessSnapshot {
    pub fn unknown() -> Self {
        Self {
            memory_usage_mb: Measurement::unknown(),
            uptime_seconds: Measurement::unknown(),
        }
    }
}

/// Dependency name to status, in check order.
pub type DependencyMap = IndexMap<&'static str, DependencyStatus>;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub api_responsive: bool,
    pub memory_usage_mb: Measurement,
    pub uptime_seconds: Measurement,
    pub dependencies: DependencyMap,
}

/// Composite health report served by the Planning gateway.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub service: &'static str,
    pub domain: &'static str,
    pub timestamp: Timestamp,
    pub version: String,
    pub environment: String,
    pub checks: HealthChecks,
}

impl HealthReport {
    pub fn compose(
        gateway: Gateway,
        version: &str,
        environment: &str,
        snapshot: ProcessSnapshot,
        dependencies: DependencyMap,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            status: overall_status(&dependencies),
            service: gateway.service_name(),
            domain: gateway.domain(),
            timestamp,
            version: version.to_string(),
            environment: environment.to_string(),
            checks: HealthChecks {
                api_responsive: true,
                memory_usage_mb: snapshot.memory_usage_mb,
                uptime_seconds: snapshot.uptime_seconds,
                dependencies,
            },
        }
    }
}

/// Report served when the composite check itself failed.
#[derive(Debug, Clone, Serialize)]
pub struct UnhealthyReport {
    pub status: HealthStatus,
    pub service: &'static str,
    pub timestamp: Timestamp,
    pub error: String,
    /// Correlates this response with the server-side log entry.
    pub reference: String,
}

impl UnhealthyReport {
    pub fn new(gateway: Gateway, reference: String, timestamp: Timestamp) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            service: gateway.service_name(),
            timestamp,
            error: "Health check failed".to_string(),
            reference,
        }
    }
}

/// Minimal `/health` payload of the Observations and Reports gateways.
#[derive(Debug, Clone, Serialize)]
pub struct Heartbeat {
    pub status: HealthStatus,
    pub service: &'static str,
    pub timestamp: Timestamp,
}

impl Heartbeat {
    pub fn new(gateway: Gateway, timestamp: Timestamp) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: gateway.service_name(),
            timestamp,
        }
    }
}

/// Fixed-shape readiness / liveness payload.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl ProbeResponse {
    pub fn ready(gateway: Gateway) -> Self {
        Self {
            status: "ready",
            service: gateway.service_name(),
        }
    }

    pub fn alive(gateway: Gateway) -> Self {
        Self {
            status: "alive",
            service: gateway.service_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status rule
// ---------------------------------------------------------------------------

/// Degraded as soon as one dependency is degraded or erroring.
///
/// `NotConfigured` and `NotImplemented` never escalate.
pub fn overall_status(dependencies: &DependencyMap) -> HealthStatus {
    if dependencies.values().any(|status| status.is_failing()) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn deps(entries: &[(&'static str, DependencyStatus)]) -> DependencyMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn unconfigured_dependencies_stay_healthy() {
        let map = deps(&[
            (DEPENDENCY_PLANNING_API, DependencyStatus::NotConfigured),
            (DEPENDENCY_DATABASE, DependencyStatus::NotImplemented),
        ]);
        assert_eq!(overall_status(&map), HealthStatus::Healthy);
    }

    #[test]
    fn degraded_dependency_escalates() {
        let map = deps(&[(DEPENDENCY_PLANNING_API, DependencyStatus::Degraded)]);
        assert_eq!(overall_status(&map), HealthStatus::Degraded);
    }

    #[test]
    fn erroring_dependency_escalates() {
        let map = deps(&[
            (
                DEPENDENCY_PLANNING_API,
                DependencyStatus::Error(DependencyFailure::Timeout),
            ),
            (DEPENDENCY_DATABASE, DependencyStatus::NotConfigured),
        ]);
        assert_eq!(overall_status(&map), HealthStatus::Degraded);
    }

    #[test]
    fn dependency_status_serializes_as_label() {
        let value = serde_json::to_value(DependencyStatus::Error(DependencyFailure::Unreachable))
            .unwrap();
        assert_eq!(value, json!("error: unreachable"));
        assert_eq!(
            serde_json::to_value(DependencyStatus::NotConfigured).unwrap(),
            json!("not_configured")
        );
    }

    #[test]
    fn measurement_rounds_or_reports_unknown() {
        assert_eq!(Measurement::known(12.3456).value(), Some(12.35));
        assert_eq!(
            serde_json::to_value(Measurement::unknown()).unwrap(),
            json!("unknown")
        );
    }

    #[test]
    fn composed_report_has_expected_shape() {
        let report = HealthReport::compose(
            Gateway::Planning,
            "1.0.0",
            "development",
            ProcessSnapshot {
                memory_usage_mb: Measurement::known(42.0),
                uptime_seconds: Measurement::unknown(),
            },
            deps(&[(DEPENDENCY_PLANNING_API, DependencyStatus::Healthy)]),
            Utc::now(),
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["service"], "planning-ai");
        assert_eq!(value["domain"], "Planning");
        assert_eq!(value["checks"]["api_responsive"], true);
        assert_eq!(value["checks"]["memory_usage_mb"], 42.0);
        assert_eq!(value["checks"]["uptime_seconds"], "unknown");
        assert_eq!(value["checks"]["dependencies"]["planning_api"], "healthy");
    }

    #[test]
    fn unhealthy_report_hides_detail() {
        let report = UnhealthyReport::new(Gateway::Planning, "ref-1".into(), Utc::now());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "unhealthy");
        assert_eq!(value["error"], "Health check failed");
        assert_eq!(value["reference"], "ref-1");
    }
}
