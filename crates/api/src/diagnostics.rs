//! Inputs of the composite health check.
//!
//! [`Diagnostics`] samples the gateway process through `sysinfo` and pings
//! the configured upstream Planning API. Neither kind of failure is
//! propagated: a failed measurement becomes `"unknown"` and a failed ping
//! becomes an error status. The only hard failure is losing the blocking
//! introspection task itself, which the handler reports as unhealthy.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use mapp_genai_core::gateway::Gateway;
use mapp_genai_core::health::{
    DependencyFailure, DependencyMap, DependencyStatus, HealthReport, Measurement,
    ProcessSnapshot, DEPENDENCY_DATABASE, DEPENDENCY_PLANNING_API,
};
use mapp_genai_core::settings::Settings;
use sysinfo::System;

/// Upper bound on a single dependency ping.
pub const DEPENDENCY_TIMEOUT: Duration = Duration::from_secs(5);

/// Time left to the health handler after the ping gives up, so the report is
/// written before the request timeout fires.
const PING_MARGIN: Duration = Duration::from_millis(500);

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError {
    /// The blocking introspection task panicked or was cancelled.
    #[error("process introspection task failed: {0}")]
    Introspection(#[from] tokio::task::JoinError),
}

/// Gathers process and dependency health for one gateway.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    client: reqwest::Client,
    planning_api_url: Option<String>,
    database_configured: bool,
    ping_timeout: Duration,
}

impl Diagnostics {
    /// The ping is bounded by [`ping_timeout_within`] the configured request
    /// timeout.
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        let request_timeout = Duration::from_secs(settings.timeout_seconds);
        Self {
            client,
            planning_api_url: settings.planning_api.configured_url().map(str::to_string),
            database_configured: settings.database_url.is_some(),
            ping_timeout: ping_timeout_within(request_timeout),
        }
    }

    /// Override the bound on a single dependency ping.
    pub fn with_ping_timeout(mut self, ping_timeout: Duration) -> Self {
        self.ping_timeout = ping_timeout;
        self
    }

    pub fn ping_timeout(&self) -> Duration {
        self.ping_timeout
    }

    /// Build the full composite report.
    pub async fn report(
        &self,
        gateway: Gateway,
        environment: &str,
    ) -> Result<HealthReport, DiagnosticsError> {
        let snapshot = tokio::task::spawn_blocking(sample_process).await?;
        let dependencies = self.check_dependencies().await;

        Ok(HealthReport::compose(
            gateway,
            env!("CARGO_PKG_VERSION"),
            environment,
            snapshot,
            dependencies,
            chrono::Utc::now(),
        ))
    }

    /// Check every dependency once, in a fixed order.
    pub async fn check_dependencies(&self) -> DependencyMap {
        let mut dependencies = DependencyMap::new();
        dependencies.insert(DEPENDENCY_PLANNING_API, self.check_planning_api().await);

        // No database check exists yet; report configuration only.
        let database = if self.database_configured {
            DependencyStatus::NotImplemented
        } else {
            DependencyStatus::NotConfigured
        };
        dependencies.insert(DEPENDENCY_DATABASE, database);

        dependencies
    }

    /// `GET <PLANNING_API_URL>/health`, bounded by the ping timeout.
    pub async fn check_planning_api(&self) -> DependencyStatus {
        let Some(base_url) = self.planning_api_url.as_deref() else {
            return DependencyStatus::NotConfigured;
        };
        let url = format!("{}/health", base_url.trim_end_matches('/'));

        match self
            .client
            .get(&url)
            .timeout(self.ping_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == reqwest::StatusCode::OK => {
                DependencyStatus::Healthy
            }
            Ok(response) => {
                tracing::warn!(%url, status = %response.status(), "Planning API health check degraded");
                DependencyStatus::Degraded
            }
            Err(err) => {
                let failure = classify_request_error(&err);
                tracing::warn!(%url, error = %err, failure = failure.as_str(), "Planning API health check failed");
                DependencyStatus::Error(failure)
            }
        }
    }
}

/// Ping bound that fits inside `request_timeout`: [`DEPENDENCY_TIMEOUT`] at
/// most, less [`PING_MARGIN`], and never below half the request timeout.
pub fn ping_timeout_within(request_timeout: Duration) -> Duration {
    request_timeout
        .saturating_sub(PING_MARGIN)
        .max(request_timeout / 2)
        .min(DEPENDENCY_TIMEOUT)
}

fn classify_request_error(err: &reqwest::Error) -> DependencyFailure {
    if err.is_timeout() {
        DependencyFailure::Timeout
    } else if err.is_connect() {
        DependencyFailure::Unreachable
    } else {
        DependencyFailure::Request
    }
}

/// Resident memory and uptime of the current process.
///
/// Blocking: reads `/proc` (or the platform equivalent).
pub fn sample_process() -> ProcessSnapshot {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            tracing::warn!(error = %e, "Cannot resolve current pid");
            return ProcessSnapshot::unknown();
        }
    };

    let mut system = System::new();
    if !system.refresh_process(pid) {
        tracing::warn!(%pid, "Process refresh failed");
        return ProcessSnapshot::unknown();
    }
    let Some(process) = system.process(pid) else {
        return ProcessSnapshot::unknown();
    };

    let memory_usage_mb = Measurement::known(process.memory() as f64 / BYTES_PER_MB);

    let uptime_seconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(now) => Measurement::known((now.as_secs_f64() - process.start_time() as f64).max(0.0)),
        Err(e) => {
            tracing::warn!(error = %e, "System clock is before the Unix epoch");
            Measurement::unknown()
        }
    };

    ProcessSnapshot {
        memory_usage_mb,
        uptime_seconds,
    }
}
