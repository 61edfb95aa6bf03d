//! Service locator for backends with several possible addresses.
//!
//! Each backend (gateway, bundler, AO compute unit, observer) may be reachable
//! on one of a few local addresses depending on how the node was deployed. The
//! locator tries the configured candidates strictly in order, one at a time,
//! and returns the first one that answers with a 2xx JSON body.
//!
//! Nothing is cached between calls: every locate starts again from the first
//! candidate.

mod error;

#[cfg(test)]
mod tests;

pub use error::*;

use crate::config::{ServiceEndpoints, ServicesConfig};
use serde_json::Value;
use std::time::Duration;

/// A candidate that answered successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Base URL of the candidate that answered
    pub endpoint: String,
    /// Position of that candidate in the configured list
    pub index: usize,
    /// Parsed JSON body of the response
    pub body: Value,
}

/// Sequential fallback prober for one backend service.
#[derive(Debug, Clone)]
pub struct ServiceLocator {
    service: String,
    endpoints: ServiceEndpoints,
    client: reqwest::Client,
}

impl ServiceLocator {
    /// Create a locator sharing the given HTTP client.
    ///
    /// The client should not carry a global timeout; each attempt is bounded
    /// by the service's own `timeout_seconds`.
    pub fn new(
        service: impl Into<String>,
        endpoints: ServiceEndpoints,
        client: reqwest::Client,
    ) -> Self {
        Self {
            service: service.into(),
            endpoints,
            client,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn candidates(&self) -> &[String] {
        &self.endpoints.candidates
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.endpoints.timeout_seconds)
    }

    /// Probe the candidates with the configured probe path.
    pub async fn locate(&self) -> Result<Located, LocatorError> {
        self.locate_path(&self.endpoints.probe_path).await
    }

    /// Probe the candidates with an explicit path.
    pub async fn locate_path(&self, path: &str) -> Result<Located, LocatorError> {
        let mut last_error: Option<ProbeError> = None;

        for (index, candidate) in self.endpoints.candidates.iter().enumerate() {
            let url = join_url(candidate, path);
            match self.probe(&url).await {
                Ok(body) => {
                    tracing::debug!(
                        service = %self.service,
                        endpoint = %candidate,
                        attempt = index + 1,
                        "Candidate endpoint answered"
                    );
                    return Ok(Located {
                        endpoint: candidate.clone(),
                        index,
                        body,
                    });
                }
                Err(error) => {
                    tracing::debug!(
                        service = %self.service,
                        endpoint = %candidate,
                        attempt = index + 1,
                        error = %error,
                        "Candidate endpoint failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(last_error) => {
                tracing::warn!(
                    service = %self.service,
                    candidates = self.endpoints.candidates.len(),
                    error = %last_error,
                    "All candidate endpoints failed"
                );
                Err(LocatorError::AllFailed {
                    service: self.service.clone(),
                    last_error,
                    candidates: self.endpoints.candidates.clone(),
                })
            }
            None => Err(LocatorError::NoCandidates {
                service: self.service.clone(),
            }),
        }
    }

    /// One bounded-time GET against a single URL.
    async fn probe(&self, url: &str) -> Result<Value, ProbeError> {
        let timeout_seconds = self.endpoints.timeout_seconds;

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(timeout_seconds))
            .send()
            .await
            .map_err(|e| classify_error(e, timeout_seconds))?;

        if !response.status().is_success() {
            return Err(ProbeError::HttpError(response.status().as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(timeout_seconds)
            } else {
                ProbeError::ParseError(e.to_string())
            }
        })
    }
}

/// One locator per backend service.
#[derive(Debug, Clone)]
pub struct ServiceLocators {
    pub gateway: ServiceLocator,
    pub bundler: ServiceLocator,
    pub ao_cu: ServiceLocator,
    pub observer: ServiceLocator,
}

impl ServiceLocators {
    pub fn from_config(config: &ServicesConfig, client: reqwest::Client) -> Self {
        let build = |name: &str, endpoints: &ServiceEndpoints| {
            ServiceLocator::new(name, endpoints.clone(), client.clone())
        };
        Self {
            gateway: build("gateway", &config.gateway),
            bundler: build("bundler", &config.bundler),
            ao_cu: build("ao_cu", &config.ao_cu),
            observer: build("observer", &config.observer),
        }
    }

    /// All locators in display order.
    pub fn all(&self) -> [&ServiceLocator; 4] {
        [&self.gateway, &self.bundler, &self.ao_cu, &self.observer]
    }
}

/// Classify reqwest error into ProbeError.
fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout(timeout_seconds)
    } else {
        ProbeError::ConnectionFailed(e.to_string())
    }
}

/// Append `path` to a base URL without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
