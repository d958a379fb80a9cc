//! Cycle execution.
//!
//! # Responsibilities
//! - Run one full pass over all endpoints through the batch scheduler
//! - Measure cycle duration
//! - Hand the report to the result sink
//!
//! # Design Decisions
//! - Settings and endpoints are injected at construction; there is no
//!   process-wide endpoint registry
//! - Delivery failures are logged and swallowed; the cycle still counts
//!   as completed once probing finished

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::batch::run_batches;
use crate::config::MonitorSettings;
use crate::observability::metrics;
use crate::probe::{EndpointSpec, Prober};
use crate::sink::ResultSink;

pub mod report;

pub use report::CycleReport;

/// Runs monitoring cycles against a fixed endpoint set.
pub struct CycleRunner<P, S> {
    settings: MonitorSettings,
    endpoints: Arc<[EndpointSpec]>,
    prober: Arc<P>,
    sink: Arc<S>,
}

impl<P: Prober, S: ResultSink> CycleRunner<P, S> {
    pub fn new(
        settings: MonitorSettings,
        endpoints: Vec<EndpointSpec>,
        prober: Arc<P>,
        sink: Arc<S>,
    ) -> Self {
        Self {
            settings,
            endpoints: endpoints.into(),
            prober,
            sink,
        }
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn endpoints(&self) -> &[EndpointSpec] {
        &self.endpoints
    }

    /// Probe every endpoint once and deliver the report.
    pub async fn run_cycle(&self) -> CycleReport {
        let started_at = Utc::now();
        let start = Instant::now();
        tracing::info!(
            endpoints = self.endpoints.len(),
            "Starting monitoring cycle at {}",
            started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let results = run_batches(
            &self.prober,
            &self.endpoints,
            self.settings.batch_size,
            self.settings.timeout(),
        )
        .await;

        let report = CycleReport {
            started_at,
            duration: start.elapsed(),
            results,
        };
        metrics::record_cycle(&report);

        if let Err(e) = self.sink.deliver(&report).await {
            metrics::record_sink_failure();
            tracing::error!(error = %e, "Error sending results to sink");
        }

        tracing::info!(
            up = report.up_count(),
            down = report.down_count(),
            "Monitoring cycle completed in {:.2} seconds",
            report.duration.as_secs_f64()
        );

        report
    }
}
