//! Site monitor library.
//!
//! Periodically probes a fixed set of HTTP(S) endpoints, classifies each as
//! up or down with latency and status metadata, and hands one aggregated
//! report per cycle to a result sink.
//!
//! ```text
//! driver (interval loop)
//!     → cycle (one pass, duration, delivery)
//!         → batch (bounded groups, join barrier, endpoint order)
//!             → probe (single GET with deadline)
//!                 → probe::classify (on failure)
//!     → sink (log / HTTP collector)
//! ```

// Core
pub mod batch;
pub mod cycle;
pub mod driver;
pub mod probe;

// Collaborators
pub mod config;
pub mod sink;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::MonitorConfig;
pub use cycle::{CycleReport, CycleRunner};
pub use driver::{DriverState, PeriodicDriver};
pub use lifecycle::Shutdown;
pub use probe::{EndpointSpec, HttpProber, ProbeResult, Prober};
pub use sink::{ConfiguredSink, ResultSink};
