//! Application context - dependency injection container

use std::future::Future;
use std::sync::Arc;

use pumpsync_core::{BatchSink, Extractor, SyncService, TransactionSource};
use pumpsync_domain::{Config, PumpSyncError, Result};
use pumpsync_infra::{
    ForwarderConfig, PostgresTransactionSource, PumpsForwarder, SchedulerError, SyncScheduler,
    SyncSchedulerConfig,
};
use tracing::{error, info};

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Shutdown was requested and the scheduler stopped cleanly.
    Stopped,
    /// A cycle hit an unrecoverable error; the process should exit non-zero.
    Fatal(PumpSyncError),
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub source: Arc<dyn TransactionSource>,
    pub sink: Arc<dyn BatchSink>,
    pub service: Arc<SyncService>,
    scheduler: SyncScheduler,
}

impl AppContext {
    /// Wire the production stack: PostgreSQL source and HTTP forwarder.
    ///
    /// # Errors
    ///
    /// Returns `PumpSyncError::Config` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(PostgresTransactionSource::new(config.database.clone()));
        Self::with_source(config, source)
    }

    /// Wire the context around a caller-supplied source.
    ///
    /// Useful for dry runs against an in-memory source.
    ///
    /// # Errors
    ///
    /// Same as [`AppContext::new`].
    pub fn with_source(config: Config, source: Arc<dyn TransactionSource>) -> Result<Self> {
        config.validate()?;

        let forwarder = PumpsForwarder::new(ForwarderConfig::from_delivery(&config.delivery)?)?;
        info!(endpoint = %forwarder.endpoint(), "Forwarder configured");
        let sink: Arc<dyn BatchSink> = Arc::new(forwarder);

        let extractor =
            Extractor::new(Arc::clone(&source), config.site.clone(), config.extraction_criteria()?);
        let service = Arc::new(SyncService::new(extractor, Arc::clone(&sink)));

        let scheduler =
            SyncScheduler::new(Arc::clone(&service), SyncSchedulerConfig::from(&config.sync));

        Ok(Self { config, source, sink, service, scheduler })
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Start polling and block until `shutdown` resolves or a cycle turns
    /// fatal, then stop the scheduler.
    ///
    /// # Errors
    ///
    /// Returns error if the scheduler cannot be started or stopped.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<RunOutcome>
    where
        F: Future<Output = ()>,
    {
        self.scheduler.start()?;
        info!(
            organization = %self.config.site.organization_code,
            gas_station = %self.config.site.gas_station_code,
            interval_secs = self.config.sync.interval_seconds,
            "Polling started"
        );

        let finished = tokio::select! {
            () = shutdown => None,
            result = self.scheduler.wait() => Some(result),
        };

        let result = match finished {
            None => {
                info!("Shutdown requested");
                self.scheduler.stop().await
            }
            Some(result) => result,
        };

        match result {
            Ok(()) => {
                info!("Polling stopped");
                Ok(RunOutcome::Stopped)
            }
            Err(SchedulerError::Fatal(err)) => {
                error!(error = %err, "Polling stopped on fatal error");
                Ok(RunOutcome::Fatal(err))
            }
            Err(err) => Err(err.into()),
        }
    }
}
