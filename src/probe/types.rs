//! Endpoint and probe result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::probe::classify::ErrorKind;

/// A named, monitored URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointSpec {
    /// Unique endpoint identifier for logging/metrics.
    pub name: String,

    /// Absolute http(s) URL to probe.
    pub url: String,

    /// Redirect hops allowed before the exchange counts as failed.
    pub max_redirects: usize,

    /// Reserved for endpoint-specific quirks.
    pub special_handling: bool,
}

impl EndpointSpec {
    pub const DEFAULT_MAX_REDIRECTS: usize = 5;

    /// Create an endpoint with default redirect limit and no special handling.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            max_redirects: Self::DEFAULT_MAX_REDIRECTS,
            special_handling: false,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

/// Outcome of one probe attempt against one endpoint.
///
/// `status_code` and `response_time_seconds` are present only when the HTTP
/// exchange completed. `error_message` is present only when it did not; an
/// error status such as 503 is a completed exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub site_name: String,
    pub url: String,
    pub status_code: Option<u16>,
    pub response_time_seconds: Option<f64>,
    pub is_up: bool,
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub timestamp: DateTime<Utc>,
}

impl ProbeResult {
    /// Result of a completed HTTP exchange.
    pub fn completed(endpoint: &EndpointSpec, status_code: u16, response_time_seconds: f64) -> Self {
        Self {
            site_name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            status_code: Some(status_code),
            response_time_seconds: Some(response_time_seconds),
            is_up: is_up_status(status_code),
            error_message: None,
            error_kind: None,
            timestamp: Utc::now(),
        }
    }

    /// Result of an exchange that never produced a response.
    pub fn failed(endpoint: &EndpointSpec, kind: ErrorKind) -> Self {
        Self {
            site_name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            status_code: None,
            response_time_seconds: None,
            is_up: false,
            error_message: Some(kind.message()),
            error_kind: Some(kind),
            timestamp: Utc::now(),
        }
    }

    /// `UP` or `DOWN`.
    pub fn status_label(&self) -> &'static str {
        if self.is_up {
            "UP"
        } else {
            "DOWN"
        }
    }
}

/// 2xx and 3xx count as up; 400 and above do not.
pub fn is_up_status(status_code: u16) -> bool {
    (200..400).contains(&status_code)
}
