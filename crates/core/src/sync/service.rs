//! Sync service - one extract-forward cycle
//!
//! Every error is handled here by logging and ending the cycle. The caller
//! only needs the [`CycleOutcome`] to decide whether to keep polling.

use std::sync::Arc;

use pumpsync_domain::PumpSyncError;
use tracing::{error, info, info_span, warn, Instrument};

use super::extractor::Extractor;
use super::ports::BatchSink;

/// How a single cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The endpoint accepted the batch.
    Delivered { records: usize, skipped_rows: usize },
    /// The query failed; nothing was sent.
    ExtractionFailed(PumpSyncError),
    /// The batch was built but not accepted; it has been dropped.
    DeliveryFailed(PumpSyncError),
    /// The cycle ran past its time limit and was abandoned.
    TimedOut,
    /// The process must stop polling.
    Fatal(PumpSyncError),
}

impl CycleOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Runs extraction followed by delivery.
pub struct SyncService {
    extractor: Extractor,
    sink: Arc<dyn BatchSink>,
}

impl SyncService {
    pub fn new(extractor: Extractor, sink: Arc<dyn BatchSink>) -> Self {
        Self { extractor, sink }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Run one cycle. Never returns an error; see [`CycleOutcome`].
    pub async fn run_cycle(&self, cycle: u64) -> CycleOutcome {
        let span = info_span!(
            "sync_cycle",
            cycle,
            organization = %self.extractor.identity().organization_code,
            gas_station = %self.extractor.identity().gas_station_code,
        );

        self.run_cycle_inner().instrument(span).await
    }

    async fn run_cycle_inner(&self) -> CycleOutcome {
        let extraction = match self.extractor.extract().await {
            Ok(extraction) => extraction,
            Err(err) if err.is_fatal() => {
                error!(error = %err, "Unrecoverable data source error; polling must stop");
                return CycleOutcome::Fatal(err);
            }
            Err(err) => {
                error!(error = %err, kind = err.label(), "Extraction failed; cycle aborted");
                return CycleOutcome::ExtractionFailed(err);
            }
        };

        let records = extraction.batch.len();
        let skipped_rows = extraction.skipped_rows;

        match self.sink.deliver(&extraction.batch).await {
            Ok(receipt) => {
                info!(records, skipped_rows, status = receipt.status, "Cycle completed");
                CycleOutcome::Delivered { records, skipped_rows }
            }
            Err(err) => {
                warn!(error = %err, kind = err.label(), records, "Batch dropped");
                CycleOutcome::DeliveryFailed(err)
            }
        }
    }
}
