//! Result delivery.
//!
//! # Responsibilities
//! - Accept one `CycleReport` per cycle
//! - Report delivery failures as `SinkError`, never panic
//!
//! # Implementations
//! - `LogSink` (log.rs): summarizes the report in the log
//! - `HttpSink` (http.rs): POSTs the results as JSON to a collector
//!
//! # Design Decisions
//! - Delivery is independent of probing; a failed delivery never
//!   invalidates the cycle that produced the report
//! - `ConfiguredSink` selects an implementation from `SinkConfig`

use std::future::Future;

use thiserror::Error;

use crate::config::{SinkConfig, SinkKind};
use crate::cycle::CycleReport;

pub mod http;
pub mod log;

pub use self::http::HttpSink;
pub use self::log::LogSink;

/// Errors that can occur while delivering a report.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Request could not be sent or the response could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Collector answered with a non-success status.
    #[error("collector at {url} rejected report with status {status}")]
    Rejected { url: String, status: u16 },

    /// Report could not be encoded.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    /// Sink could not be constructed.
    #[error("sink setup failed: {0}")]
    Setup(String),
}

/// External consumer of cycle reports.
pub trait ResultSink: Send + Sync + 'static {
    /// Deliver one report.
    fn deliver(&self, report: &CycleReport) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Sink selected by configuration.
#[derive(Debug)]
pub enum ConfiguredSink {
    Log(LogSink),
    Http(HttpSink),
}

impl ConfiguredSink {
    pub fn from_config(config: &SinkConfig) -> Result<Self, SinkError> {
        match config.kind {
            SinkKind::Log => Ok(ConfiguredSink::Log(LogSink)),
            SinkKind::Http => {
                let sink = HttpSink::new(config)?;
                tracing::info!(url = %sink.url(), "Reports will be posted to collector");
                Ok(ConfiguredSink::Http(sink))
            }
        }
    }
}

impl ResultSink for ConfiguredSink {
    async fn deliver(&self, report: &CycleReport) -> Result<(), SinkError> {
        match self {
            ConfiguredSink::Log(sink) => sink.deliver(report).await,
            ConfiguredSink::Http(sink) => sink.deliver(report).await,
        }
    }
}
