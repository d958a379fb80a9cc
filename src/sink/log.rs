//! Log sink.

use crate::cycle::CycleReport;
use crate::sink::{ResultSink, SinkError};

/// Writes a summary of each report to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ResultSink for LogSink {
    async fn deliver(&self, report: &CycleReport) -> Result<(), SinkError> {
        tracing::info!(
            endpoints = report.results.len(),
            up = report.up_count(),
            down = report.down_count(),
            "Results sent to log sink"
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            let json = serde_json::to_string(&report.results)?;
            tracing::debug!(report = %json, "Cycle results");
        }
        Ok(())
    }
}
