//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define monitor metrics (endpoint status, latency, failures, cycles)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `monitor_endpoint_up` (gauge): 1=up, 0=down, by endpoint
//! - `monitor_response_time_seconds` (histogram): latency by endpoint
//! - `monitor_probe_failures_total` (counter): failed exchanges by endpoint, kind
//! - `monitor_cycle_duration_seconds` (histogram): full cycle duration
//! - `monitor_endpoints_down` (gauge): endpoints down in the last cycle
//! - `monitor_sink_failures_total` (counter): failed report deliveries
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so the core
//!   records unconditionally
//! - Labels for endpoint name and failure kind

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::cycle::CycleReport;
use crate::probe::ProbeResult;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of a single probe.
pub fn record_probe(result: &ProbeResult) {
    let endpoint = result.site_name.clone();

    ::metrics::gauge!("monitor_endpoint_up", "endpoint" => endpoint.clone())
        .set(if result.is_up { 1.0 } else { 0.0 });

    if let Some(seconds) = result.response_time_seconds {
        ::metrics::histogram!("monitor_response_time_seconds", "endpoint" => endpoint.clone())
            .record(seconds);
    }

    if let Some(kind) = &result.error_kind {
        ::metrics::counter!(
            "monitor_probe_failures_total",
            "endpoint" => endpoint,
            "kind" => kind.label()
        )
        .increment(1);
    }
}

/// Record a finished cycle.
pub fn record_cycle(report: &CycleReport) {
    ::metrics::histogram!("monitor_cycle_duration_seconds").record(report.duration.as_secs_f64());
    ::metrics::gauge!("monitor_endpoints_down").set(report.down_count() as f64);
}

/// Record a failed report delivery.
pub fn record_sink_failure() {
    ::metrics::counter!("monitor_sink_failures_total").increment(1);
}
