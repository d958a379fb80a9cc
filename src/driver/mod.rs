//! Periodic cycle driver.
//!
//! # States
//! - Running: executing cycles, sleeping `interval` between them
//! - Stopped: shutdown signal received (terminal, clean)
//!
//! # State Transitions
//! ```text
//! Running → Running: cycle finished (or panicked), interval elapsed
//! Running → Stopped: shutdown signal, during a cycle or during the sleep
//! ```
//!
//! # Design Decisions
//! - Each cycle runs in its own task, so a panic inside a cycle is caught
//!   as a `JoinError`, logged, and the driver stays Running
//! - Shutdown during a cycle aborts that cycle's task; its probe tasks are
//!   aborted with it and nothing partial reaches the sink
//! - The interval is a sleep after each cycle, not a fixed-rate ticker, so
//!   cycles never overlap

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::cycle::CycleRunner;
use crate::probe::Prober;
use crate::sink::ResultSink;

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Runs a `CycleRunner` forever on a fixed interval, until shutdown.
pub struct PeriodicDriver<P, S> {
    runner: Arc<CycleRunner<P, S>>,
    interval: Duration,
    cycles_completed: AtomicU64,
}

impl<P: Prober, S: ResultSink> PeriodicDriver<P, S> {
    /// Create a driver using the runner's configured interval.
    pub fn new(runner: Arc<CycleRunner<P, S>>) -> Self {
        let interval = runner.settings().interval();
        Self {
            runner,
            interval,
            cycles_completed: AtomicU64::new(0),
        }
    }

    /// Override the delay between cycles.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of cycles that finished probing.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed.load(Ordering::Relaxed)
    }

    /// Run until the shutdown signal fires. Always ends `Stopped`.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> DriverState {
        tracing::info!(
            interval_secs = self.interval().as_secs_f64(),
            endpoints = self.runner.endpoints().len(),
            "Starting scheduled monitoring"
        );

        let mut state = DriverState::Running;
        while state == DriverState::Running {
            state = self.tick(&mut shutdown).await;
        }

        tracing::info!(
            cycles = self.cycles_completed(),
            "Monitoring stopped"
        );
        state
    }

    /// One cycle followed by one interval sleep.
    async fn tick(&self, shutdown: &mut broadcast::Receiver<()>) -> DriverState {
        let runner = Arc::clone(&self.runner);
        let mut cycle = tokio::spawn(async move { runner.run_cycle().await });

        tokio::select! {
            joined = &mut cycle => match joined {
                Ok(_) => {
                    self.cycles_completed.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error during monitoring cycle");
                }
            },
            _ = shutdown.recv() => {
                cycle.abort();
                if let Err(e) = cycle.await {
                    if !e.is_cancelled() {
                        tracing::error!(error = %e, "Error during monitoring cycle");
                    }
                }
                tracing::info!("Shutdown received, abandoning in-progress cycle");
                return DriverState::Stopped;
            }
        }

        tokio::select! {
            _ = time::sleep(self.interval) => DriverState::Running,
            _ = shutdown.recv() => {
                tracing::info!("Shutdown received between cycles");
                DriverState::Stopped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorSettings;
    use crate::cycle::CycleReport;
    use crate::lifecycle::Shutdown;
    use crate::probe::{EndpointSpec, ProbeResult};
    use crate::sink::SinkError;
    use std::sync::atomic::AtomicUsize;

    struct DelayProber(Duration);

    impl Prober for DelayProber {
        async fn probe(&self, endpoint: &EndpointSpec, _timeout: Duration) -> ProbeResult {
            time::sleep(self.0).await;
            ProbeResult::completed(endpoint, 200, self.0.as_secs_f64())
        }
    }

    #[derive(Default)]
    struct CountingSink {
        calls: AtomicUsize,
        fail: bool,
        panic: bool,
    }

    impl ResultSink for CountingSink {
        async fn deliver(&self, _report: &CycleReport) -> Result<(), SinkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.panic {
                panic!("sink exploded");
            }
            if self.fail {
                return Err(SinkError::Setup("collector offline".into()));
            }
            Ok(())
        }
    }

    fn driver(
        probe_delay: Duration,
        sink: Arc<CountingSink>,
        interval: Duration,
    ) -> Arc<PeriodicDriver<DelayProber, CountingSink>> {
        let runner = CycleRunner::new(
            MonitorSettings::default(),
            vec![
                EndpointSpec::new("a", "http://a.example"),
                EndpointSpec::new("b", "http://b.example"),
            ],
            Arc::new(DelayProber(probe_delay)),
            sink,
        );
        Arc::new(PeriodicDriver::new(Arc::new(runner)).with_interval(interval))
    }

    #[test]
    fn test_interval_from_settings() {
        let runner = CycleRunner::new(
            MonitorSettings::default(),
            Vec::new(),
            Arc::new(DelayProber(Duration::ZERO)),
            Arc::new(CountingSink::default()),
        );
        let driver = PeriodicDriver::new(Arc::new(runner));
        assert_eq!(driver.interval(), Duration::from_secs(60));
        assert_eq!(driver.cycles_completed(), 0);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_driver() {
        let sink = Arc::new(CountingSink {
            fail: true,
            ..CountingSink::default()
        });
        let driver = driver(Duration::from_millis(1), Arc::clone(&sink), Duration::from_millis(20));
        let shutdown = Shutdown::new();

        let task = tokio::spawn({
            let driver = Arc::clone(&driver);
            let rx = shutdown.subscribe();
            async move { driver.run(rx).await }
        });

        time::sleep(Duration::from_millis(300)).await;
        shutdown.trigger();

        let state = task.await.unwrap();
        assert_eq!(state, DriverState::Stopped);
        assert!(sink.calls.load(Ordering::SeqCst) >= 2);
        assert!(driver.cycles_completed() >= 2);
    }

    #[tokio::test]
    async fn test_panicking_cycle_keeps_driver_running() {
        let sink = Arc::new(CountingSink {
            panic: true,
            ..CountingSink::default()
        });
        let driver = driver(Duration::from_millis(1), Arc::clone(&sink), Duration::from_millis(20));
        let shutdown = Shutdown::new();

        let task = tokio::spawn({
            let driver = Arc::clone(&driver);
            let rx = shutdown.subscribe();
            async move { driver.run(rx).await }
        });

        time::sleep(Duration::from_millis(300)).await;
        shutdown.trigger();

        assert_eq!(task.await.unwrap(), DriverState::Stopped);
        assert!(sink.calls.load(Ordering::SeqCst) >= 2);
        assert_eq!(driver.cycles_completed(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_mid_cycle_delivers_nothing() {
        let sink = Arc::new(CountingSink::default());
        let driver = driver(Duration::from_secs(30), Arc::clone(&sink), Duration::from_secs(60));
        let shutdown = Shutdown::new();

        let task = tokio::spawn({
            let driver = Arc::clone(&driver);
            let rx = shutdown.subscribe();
            async move { driver.run(rx).await }
        });

        time::sleep(Duration::from_millis(50)).await;
        shutdown.trigger();

        let state = time::timeout(Duration::from_secs(2), task)
            .await
            .expect("driver did not stop")
            .unwrap();
        assert_eq!(state, DriverState::Stopped);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
        assert_eq!(driver.cycles_completed(), 0);
    }

    #[tokio::test]
    async fn test_stopped_driver_leaves_no_cycle_task() {
        let runner = Arc::new(CycleRunner::new(
            MonitorSettings::default(),
            vec![EndpointSpec::new("a", "http://a.example")],
            Arc::new(DelayProber(Duration::from_secs(30))),
            Arc::new(CountingSink::default()),
        ));
        let driver = Arc::new(PeriodicDriver::new(Arc::clone(&runner)));
        let shutdown = Shutdown::new();

        let task = tokio::spawn({
            let driver = Arc::clone(&driver);
            let rx = shutdown.subscribe();
            async move { driver.run(rx).await }
        });

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(Arc::strong_count(&runner), 3);
        shutdown.trigger();

        assert_eq!(task.await.unwrap(), DriverState::Stopped);
        // Only this test and the driver still hold the runner.
        assert_eq!(Arc::strong_count(&runner), 2);
    }
}
