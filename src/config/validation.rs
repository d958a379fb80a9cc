//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs (absolute, http or https)
//! - Validate value ranges (batch size, timeouts, interval > 0)
//! - Validate sink and metrics addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{MonitorConfig, SinkKind};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no endpoints configured")]
    NoEndpoints,

    #[error("endpoint name must not be empty")]
    EmptyName,

    #[error("duplicate endpoint name `{0}`")]
    DuplicateName(String),

    #[error("endpoint `{name}` has invalid URL `{url}`: {reason}")]
    InvalidUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),

    #[error("invalid sink URL `{0}`")]
    InvalidSinkUrl(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }

    let mut seen = HashSet::new();
    for endpoint in &config.endpoints {
        if endpoint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }
        if !seen.insert(endpoint.name.as_str()) {
            errors.push(ValidationError::DuplicateName(endpoint.name.clone()));
        }
        if let Err(reason) = check_http_url(&endpoint.url) {
            errors.push(ValidationError::InvalidUrl {
                name: endpoint.name.clone(),
                url: endpoint.url.clone(),
                reason,
            });
        }
    }

    let monitor = &config.monitor;
    if monitor.batch_size == 0 {
        errors.push(ValidationError::Zero("monitor.batch_size"));
    }
    if monitor.timeout_secs == 0 {
        errors.push(ValidationError::Zero("monitor.timeout_secs"));
    }
    if monitor.interval_secs == 0 {
        errors.push(ValidationError::Zero("monitor.interval_secs"));
    }

    if config.sink.kind == SinkKind::Http {
        if check_http_url(&config.sink.server_url).is_err() {
            errors.push(ValidationError::InvalidSinkUrl(config.sink.server_url.clone()));
        }
        if config.sink.timeout_secs == 0 {
            errors.push(ValidationError::Zero("sink.timeout_secs"));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme `{}`", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
