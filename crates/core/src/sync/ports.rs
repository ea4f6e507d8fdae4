//! Port interfaces for sync operations

use async_trait::async_trait;
use pumpsync_domain::{ExtractionCriteria, Result, RowResult, SyncBatch};

/// Source of eligible pump transactions.
///
/// Implementations own their connection lifecycle: anything acquired for a
/// call must be released before it returns, on every path.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every row matching `criteria`, newest processing time first.
    ///
    /// Rows that fail to decode are returned as `Err` entries so the caller
    /// can skip them; a failure of the query itself is the outer `Err`.
    async fn fetch_eligible(&self, criteria: &ExtractionCriteria) -> Result<Vec<RowResult>>;
}

/// Acknowledgement of a delivered batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub records: usize,
}

/// Destination for sync batches.
#[async_trait]
pub trait BatchSink: Send + Sync {
    /// Deliver one batch with a single attempt.
    ///
    /// Anything other than an explicit acceptance is an `Err`; the batch is
    /// not kept for later.
    async fn deliver(&self, batch: &SyncBatch) -> Result<DeliveryReceipt>;
}
