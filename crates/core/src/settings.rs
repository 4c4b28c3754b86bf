//! Process-wide gateway settings resolved from environment variables.
//!
//! [`Settings`] is built exactly once at process start and shared
//! read-only (behind an `Arc`) with every handler. There is no reload.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_MODEL_NAME: &str = "gpt-3.5-turbo";
pub const DEFAULT_PLANNING_API_URL: &str = "http://localhost:5001";
pub const DEFAULT_OBSERVATIONS_API_URL: &str = "http://localhost:5002";
pub const DEFAULT_USERMANAGEMENT_API_URL: &str = "http://localhost:5003";
pub const DEFAULT_REPORTS_API_URL: &str = "http://localhost:5004";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
/// Placeholder secret shipped for local development only.
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";
pub const DEFAULT_MAX_WORKERS: usize = 4;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_ENVIRONMENT: &str = "development";

// ---------------------------------------------------------------------------
// Upstream endpoints
// ---------------------------------------------------------------------------

/// Base URL of an upstream MAPP domain API.
///
/// `configured` records whether the URL came from the environment or from
/// the built-in default; dependency checks only ping explicitly configured
/// upstreams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    pub url: String,
    pub configured: bool,
}

impl UpstreamEndpoint {
    fn resolve(value: Option<String>, default: &str) -> Self {
        match value {
            Some(url) => Self {
                url,
                configured: true,
            },
            None => Self {
                url: default.to_string(),
                configured: false,
            },
        }
    }

    /// The URL, but only when it was explicitly configured.
    pub fn configured_url(&self) -> Option<&str> {
        self.configured.then_some(self.url.as_str())
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Gateway settings. Immutable after construction.
#[derive(Clone)]
pub struct Settings {
    pub api_host: String,
    pub api_port: u16,
    pub database_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub model_name: String,
    pub planning_api: UpstreamEndpoint,
    pub observations_api: UpstreamEndpoint,
    pub usermanagement_api: UpstreamEndpoint,
    pub reports_api: UpstreamEndpoint,
    pub log_level: String,
    pub secret_key: String,
    /// Tokio worker threads for the gateway runtime.
    pub max_workers: usize,
    /// Per-request timeout applied by the HTTP middleware stack.
    pub timeout_seconds: u64,
    pub environment: String,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// | Env Var                  | Default                   |
    /// |--------------------------|---------------------------|
    /// | `API_HOST`               | `0.0.0.0`                 |
    /// | `PORT`                   | per gateway               |
    /// | `DATABASE_URL`           | unset                     |
    /// | `OPENAI_API_KEY`         | unset                     |
    /// | `MODEL_NAME`             | `gpt-3.5-turbo`           |
    /// | `PLANNING_API_URL`       | `http://localhost:5001`   |
    /// | `OBSERVATIONS_API_URL`   | `http://localhost:5002`   |
    /// | `USERMANAGEMENT_API_URL` | `http://localhost:5003`   |
    /// | `REPORTS_API_URL`        | `http://localhost:5004`   |
    /// | `LOG_LEVEL`              | `INFO`                    |
    /// | `SECRET_KEY`             | `your-secret-key-here`    |
    /// | `MAX_WORKERS`            | `4`                       |
    /// | `TIMEOUT_SECONDS`        | `30`                      |
    /// | `ENVIRONMENT`            | `development`             |
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_port = parse_or(get("PORT"), "PORT", "u16", default_port)?;

        let max_workers = parse_or(get("MAX_WORKERS"), "MAX_WORKERS", "usize", DEFAULT_MAX_WORKERS)?;
        if max_workers == 0 {
            return Err(ConfigError::MustBePositive { var: "MAX_WORKERS" });
        }

        let timeout_seconds = parse_or(
            get("TIMEOUT_SECONDS"),
            "TIMEOUT_SECONDS",
            "u64",
            DEFAULT_TIMEOUT_SECONDS,
        )?;
        if timeout_seconds == 0 {
            return Err(ConfigError::MustBePositive {
                var: "TIMEOUT_SECONDS",
            });
        }

        Ok(Self {
            api_host: get("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.into()),
            api_port,
            database_url: get("DATABASE_URL"),
            openai_api_key: get("OPENAI_API_KEY"),
            model_name: get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.into()),
            planning_api: UpstreamEndpoint::resolve(
                get("PLANNING_API_URL"),
                DEFAULT_PLANNING_API_URL,
            ),
            observations_api: UpstreamEndpoint::resolve(
                get("OBSERVATIONS_API_URL"),
                DEFAULT_OBSERVATIONS_API_URL,
            ),
            usermanagement_api: UpstreamEndpoint::resolve(
                get("USERMANAGEMENT_API_URL"),
                DEFAULT_USERMANAGEMENT_API_URL,
            ),
            reports_api: UpstreamEndpoint::resolve(
                get("REPORTS_API_URL"),
                DEFAULT_REPORTS_API_URL,
            ),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            secret_key: get("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.into()),
            max_workers,
            timeout_seconds,
            environment: get("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.into()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case(DEFAULT_ENVIRONMENT)
    }

    /// Whether `SECRET_KEY` was left at the development placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// `LOG_LEVEL` normalised to a `tracing` filter directive.
    pub fn log_directive(&self) -> &'static str {
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" | "warning" => "warn",
            "error" | "critical" => "error",
            _ => "info",
        }
    }
}

/// Secrets and the database URL (which may embed credentials) are redacted.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_host", &self.api_host)
            .field("api_port", &self.api_port)
            .field("database_url", &redacted(&self.database_url))
            .field("openai_api_key", &redacted(&self.openai_api_key))
            .field("model_name", &self.model_name)
            .field("planning_api", &self.planning_api)
            .field("observations_api", &self.observations_api)
            .field("usermanagement_api", &self.usermanagement_api)
            .field("reports_api", &self.reports_api)
            .field("log_level", &self.log_level)
            .field("secret_key", &"<redacted>")
            .field("max_workers", &self.max_workers)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("environment", &self.environment)
            .finish()
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

fn parse_or<T: FromStr>(
    value: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber {
                var,
                expected,
                value: raw,
            }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
