//! Batch scheduling of probes.
//!
//! # Data Flow
//! ```text
//! [e0 e1 e2 e3 e4 | e5 e6 e7 e8 e9 | e10 ...]   (consecutive groups of batch_size)
//!     → group 0: one task per endpoint, all joined
//!     → group 1: starts only after group 0 is fully joined
//!     → ...
//!     → results in endpoint order
//! ```
//!
//! # Design Decisions
//! - Concurrency is bounded per batch, not by a global pool: at most
//!   `batch_size` probes are in flight
//! - Each task carries its slot index; results land in a pre-sized slot
//!   vector, so output order never depends on completion order
//! - Tasks live in a `JoinSet`, which aborts them if the batch future is
//!   dropped; no task outlives its batch
//! - A task that dies without a result still fills its slot with a failure

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::observability::metrics;
use crate::probe::{EndpointSpec, ErrorKind, ProbeResult, Prober};

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Probe every endpoint once, at most `batch_size` at a time.
///
/// Returns exactly one result per endpoint, in endpoint order. A
/// `batch_size` of zero is treated as one.
pub async fn run_batches<P: Prober>(
    prober: &Arc<P>,
    endpoints: &[EndpointSpec],
    batch_size: usize,
    timeout: Duration,
) -> Vec<ProbeResult> {
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(endpoints.len());

    for (index, batch) in endpoints.chunks(batch_size).enumerate() {
        tracing::debug!(batch = index, size = batch.len(), "Starting batch");

        let batch_results = run_batch(prober, batch, timeout).await;

        for result in &batch_results {
            match &result.error_message {
                Some(message) => tracing::info!(
                    "Checked {}: {} ({})",
                    result.site_name,
                    result.status_label(),
                    message
                ),
                None => tracing::info!("Checked {}: {}", result.site_name, result.status_label()),
            }
        }

        results.extend(batch_results);
    }

    results
}

/// Run one group concurrently and join every task before returning.
async fn run_batch<P: Prober>(
    prober: &Arc<P>,
    batch: &[EndpointSpec],
    timeout: Duration,
) -> Vec<ProbeResult> {
    let mut tasks = JoinSet::new();
    for (slot, endpoint) in batch.iter().enumerate() {
        let prober = Arc::clone(prober);
        let endpoint = endpoint.clone();
        tasks.spawn(async move {
            let result = prober.probe(&endpoint, timeout).await;
            (slot, result)
        });
    }

    let mut slots: Vec<Option<ProbeResult>> = vec![None; batch.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((slot, result)) => slots[slot] = Some(result),
            Err(e) => {
                // The slot is recovered below, once every task has finished.
                tracing::error!(error = %e, "Probe task failed");
            }
        }
    }

    slots
        .into_iter()
        .zip(batch)
        .map(|(slot, endpoint)| {
            slot.unwrap_or_else(|| {
                tracing::error!(
                    site = %endpoint.name,
                    url = %endpoint.url,
                    "Probe produced no result"
                );
                let result = ProbeResult::failed(endpoint, ErrorKind::Unknown);
                metrics::record_probe(&result);
                result
            })
        })
        .collect()
}
