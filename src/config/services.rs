//! Backend service candidate lists

use serde::{Deserialize, Serialize};

/// Per-attempt probe timeout used when none is configured.
pub const DEFAULT_PROBE_TIMEOUT_SECONDS: u64 = 5;

/// Ordered candidate base URLs for one backend service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    /// Base URLs, tried in order
    pub candidates: Vec<String>,
    /// Path appended to each candidate when probing
    #[serde(default)]
    pub probe_path: String,
    /// Timeout for each attempt
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECONDS
}

impl ServiceEndpoints {
    pub fn new(candidates: &[&str], probe_path: &str) -> Self {
        Self {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            probe_path: probe_path.to_string(),
            timeout_seconds: DEFAULT_PROBE_TIMEOUT_SECONDS,
        }
    }
}

/// Candidate lists for every backend the dashboard talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub gateway: ServiceEndpoints,
    pub bundler: ServiceEndpoints,
    pub ao_cu: ServiceEndpoints,
    pub observer: ServiceEndpoints,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            gateway: ServiceEndpoints::new(
                &["http://localhost:3000", "http://localhost:4000"],
                "/ar-io/info",
            ),
            bundler: ServiceEndpoints::new(
                &[
                    "http://localhost:5100",
                    "http://127.0.0.1:5100",
                    "http://upload-service:5100",
                ],
                "/bundler/info",
            ),
            ao_cu: ServiceEndpoints::new(
                &[
                    "http://localhost:6363",
                    "http://127.0.0.1:6363",
                    "http://ao-cu:6363",
                    "http://host.docker.internal:6363",
                ],
                "/",
            ),
            observer: ServiceEndpoints::new(
                &[
                    "http://localhost:5050",
                    "http://127.0.0.1:5050",
                    "http://observer:5050",
                ],
                "/ar-io/observer/reports/current",
            ),
        }
    }
}

impl ServicesConfig {
    /// All services with their config key, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ServiceEndpoints)> {
        [
            ("gateway", &self.gateway),
            ("bundler", &self.bundler),
            ("ao_cu", &self.ao_cu),
            ("observer", &self.observer),
        ]
        .into_iter()
    }
}
