//! Probing subsystem.
//!
//! # Data Flow
//! ```text
//! EndpointSpec + timeout
//!     → http.rs (single GET, redirect limit, deadline)
//!     → on failure: classify.rs (stable error category)
//!     → ProbeResult (types.rs)
//! ```
//!
//! # Design Decisions
//! - A probe never fails: every failure becomes data in the result
//! - The `Prober` trait is the seam between scheduling and transport,
//!   so batches and cycles can run against in-memory probers in tests

use std::future::Future;
use std::time::Duration;

pub mod classify;
pub mod http;
pub mod types;

pub use classify::{classify, ErrorKind};
pub use http::{HttpProber, ProbeError};
pub use types::{is_up_status, EndpointSpec, ProbeResult};

/// Performs one health-check attempt against one endpoint.
pub trait Prober: Send + Sync + 'static {
    /// Probe `endpoint`, giving up after `timeout`.
    ///
    /// Implementations must always return a result, including on failure.
    fn probe(
        &self,
        endpoint: &EndpointSpec,
        timeout: Duration,
    ) -> impl Future<Output = ProbeResult> + Send;
}
