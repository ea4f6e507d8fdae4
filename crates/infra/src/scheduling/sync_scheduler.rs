//! Sync scheduler for periodic extract-and-forward cycles.
//!
//! Fires a cycle immediately on start and then once per interval. Each
//! cycle runs as its own task, so a slow database or endpoint does not
//! delay the next tick unless [`OverlapPolicy::SkipIfBusy`] is configured.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pumpsync_core::SyncService;
//! use pumpsync_infra::scheduling::{SyncScheduler, SyncSchedulerConfig};
//!
//! # async fn example(service: Arc<SyncService>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut scheduler = SyncScheduler::new(service, SyncSchedulerConfig::default());
//!
//! scheduler.start()?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use pumpsync_core::{CycleOutcome, SyncService};
use pumpsync_domain::constants::DEFAULT_SYNC_INTERVAL_SECS;
use pumpsync_domain::{OverlapPolicy, SyncConfig};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// How long `stop` waits for the loop to wind down.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for sync scheduler
#[derive(Debug, Clone)]
pub struct SyncSchedulerConfig {
    /// Time between cycle starts
    pub interval: Duration,
    /// Behaviour when a tick arrives while a cycle is still running
    pub overlap: OverlapPolicy,
    /// Upper bound for a single cycle; `None` lets it run to completion
    pub cycle_timeout: Option<Duration>,
}

impl Default for SyncSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
            overlap: OverlapPolicy::default(),
            cycle_timeout: None,
        }
    }
}

impl From<&SyncConfig> for SyncSchedulerConfig {
    fn from(config: &SyncConfig) -> Self {
        Self {
            interval: config.interval(),
            overlap: config.overlap,
            cycle_timeout: config.cycle_timeout(),
        }
    }
}

/// Sync scheduler driving a [`SyncService`]
pub struct SyncScheduler {
    service: Arc<SyncService>,
    config: SyncSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: Option<JoinHandle<SchedulerResult<()>>>,
}

impl SyncScheduler {
    pub fn new(service: Arc<SyncService>, config: SyncSchedulerConfig) -> Self {
        Self {
            service,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: None,
        }
    }

    pub fn config(&self) -> &SyncSchedulerConfig {
        &self.config
    }

    /// Start the scheduler
    ///
    /// Spawns the polling loop. The first cycle starts right away.
    ///
    /// # Errors
    ///
    /// Returns error if scheduler is already running
    #[instrument(skip(self), fields(interval_secs = self.config.interval.as_secs()))]
    pub fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        // Fresh token so the scheduler can be restarted after stop
        self.cancellation_token = CancellationToken::new();

        let service = Arc::clone(&self.service);
        let config = self.config.clone();
        let cancel = self.cancellation_token.clone();

        self.task_handle = Some(tokio::spawn(Self::sync_loop(service, config, cancel)));

        info!(overlap = ?self.config.overlap, "Sync scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    ///
    /// Cancels the loop, aborts cycles still in flight and joins the task.
    /// A loop that already ended on a fatal cycle reports that error here.
    ///
    /// # Errors
    ///
    /// Returns error if the scheduler was never started or the loop does not
    /// exit in time.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let Some(mut handle) = self.task_handle.take() else {
            return Err(SchedulerError::NotRunning);
        };

        info!("Stopping sync scheduler");
        self.cancellation_token.cancel();

        let joined = match tokio::time::timeout(STOP_TIMEOUT, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                handle.abort();
                return Err(SchedulerError::Timeout { seconds: STOP_TIMEOUT.as_secs() });
            }
        };

        info!("Sync scheduler stopped");
        joined.map_err(|e| SchedulerError::TaskJoinFailed(e.to_string()))?
    }

    /// Wait for the polling loop to end on its own.
    ///
    /// Only a fatal cycle ends the loop without `stop`, so in practice this
    /// resolves to [`SchedulerError::Fatal`]. Dropping the future leaves the
    /// scheduler untouched.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the loop, or `NotRunning`.
    pub async fn wait(&mut self) -> SchedulerResult<()> {
        let Some(handle) = self.task_handle.as_mut() else {
            return Err(SchedulerError::NotRunning);
        };

        let joined = handle.await;
        self.task_handle = None;
        joined.map_err(|e| SchedulerError::TaskJoinFailed(e.to_string()))?
    }

    /// Check if the polling loop is alive
    pub fn is_running(&self) -> bool {
        self.task_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    async fn sync_loop(
        service: Arc<SyncService>,
        config: SyncSchedulerConfig,
        cancel: CancellationToken,
    ) -> SchedulerResult<()> {
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut cycles: JoinSet<CycleOutcome> = JoinSet::new();
        let mut cycle: u64 = 0;

        let result = loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    debug!("Sync loop cancelled");
                    break Ok(());
                }
                Some(joined) = cycles.join_next() => match joined {
                    Ok(CycleOutcome::Fatal(err)) => {
                        error!(error = %err, "Stopping sync loop after fatal cycle");
                        break Err(SchedulerError::Fatal(err));
                    }
                    Ok(_) => {}
                    Err(err) if err.is_cancelled() => {}
                    Err(err) => error!(error = %err, "Sync cycle task panicked"),
                },
                _ = ticker.tick() => {
                    if config.overlap == OverlapPolicy::SkipIfBusy && !cycles.is_empty() {
                        debug!(in_flight = cycles.len(), "Previous cycle still running; tick skipped");
                        continue;
                    }

                    cycle += 1;
                    if !cycles.is_empty() {
                        debug!(cycle, in_flight = cycles.len(), "Starting cycle while others are in flight");
                    }
                    cycles.spawn(run_cycle(Arc::clone(&service), cycle, config.cycle_timeout));
                }
            }
        };

        cycles.shutdown().await;
        result
    }
}

async fn run_cycle(service: Arc<SyncService>, cycle: u64, limit: Option<Duration>) -> CycleOutcome {
    let Some(limit) = limit else {
        return service.run_cycle(cycle).await;
    };

    if let Ok(outcome) = tokio::time::timeout(limit, service.run_cycle(cycle)).await {
        outcome
    } else {
        warn!(cycle, timeout_secs = limit.as_secs(), "Sync cycle timed out; abandoned");
        CycleOutcome::TimedOut
    }
}

/// Ensure scheduler is stopped when dropped
impl Drop for SyncScheduler {
    fn drop(&mut self) {
        if self.task_handle.is_some() && !self.cancellation_token.is_cancelled() {
            warn!("SyncScheduler dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
