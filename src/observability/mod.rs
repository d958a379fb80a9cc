//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probes, batches, cycles and sinks produce:
//!     → tracing events (initialized by logging.rs)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (site, url, error) on every per-endpoint event
//! - Metrics endpoint is opt-in

pub mod logging;
pub mod metrics;
