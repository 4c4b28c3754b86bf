//! Identity of the three deployable gateways.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gateway {
    Observations,
    Planning,
    Reports,
}

impl Gateway {
    /// Service name reported in health payloads and logs.
    pub fn service_name(self) -> &'static str {
        match self {
            Self::Observations => "observations-ai",
            Self::Planning => "planning-ai",
            Self::Reports => "reports-ai",
        }
    }

    /// MAPP domain the gateway serves.
    pub fn domain(self) -> &'static str {
        match self {
            Self::Observations => "Observations",
            Self::Planning => "Planning",
            Self::Reports => "Reports",
        }
    }

    /// Port used when `PORT` is not set.
    pub fn default_port(self) -> u16 {
        match self {
            Self::Planning => 8001,
            Self::Observations => 8002,
            Self::Reports => 8003,
        }
    }

    /// Human-readable service title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Observations => "MAPP Observations AI Service",
            Self::Planning => "MAPP Planning AI Service",
            Self::Reports => "MAPP Reports AI Service",
        }
    }
}
