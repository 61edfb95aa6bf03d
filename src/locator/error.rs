//! Error types for endpoint probing.

use thiserror::Error;

/// Why a single candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Non-2xx status
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// 2xx with a body that is not JSON
    #[error("invalid response: {0}")]
    ParseError(String),
}

/// Failure of a whole locate call.
#[derive(Debug, Clone, Error)]
pub enum LocatorError {
    #[error("no candidate endpoints configured for {service}")]
    NoCandidates { service: String },

    #[error("all {service} endpoints failed (last error: {last_error})")]
    AllFailed {
        service: String,
        last_error: ProbeError,
        /// Every candidate that was tried, in order
        candidates: Vec<String>,
    },
}
