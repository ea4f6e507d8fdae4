//! Extraction of eligible transactions into a sync batch

use std::sync::Arc;

use pumpsync_domain::{ExtractionCriteria, Result, SiteIdentity, SyncBatch, TransportRecord};
use tracing::{debug, instrument, warn};

use super::ports::TransactionSource;

/// Result of one extraction: the batch plus how many rows were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub batch: SyncBatch,
    pub skipped_rows: usize,
}

/// Queries the source and maps every decodable row into the outbound shape.
pub struct Extractor {
    source: Arc<dyn TransactionSource>,
    identity: SiteIdentity,
    criteria: ExtractionCriteria,
}

impl Extractor {
    pub fn new(
        source: Arc<dyn TransactionSource>,
        identity: SiteIdentity,
        criteria: ExtractionCriteria,
    ) -> Self {
        Self { source, identity, criteria }
    }

    pub fn identity(&self) -> &SiteIdentity {
        &self.identity
    }

    pub fn criteria(&self) -> &ExtractionCriteria {
        &self.criteria
    }

    /// Build this cycle's batch.
    ///
    /// Undecodable rows are logged and skipped; source order is kept.
    ///
    /// # Errors
    ///
    /// Propagates the source error when the query itself fails. No partial
    /// batch is produced in that case.
    #[instrument(skip(self), fields(company_id = self.criteria.company_id()))]
    pub async fn extract(&self) -> Result<Extraction> {
        let rows = self.source.fetch_eligible(&self.criteria).await?;

        let mut records = Vec::with_capacity(rows.len());
        let mut skipped_rows = 0;

        for row in rows {
            match row {
                Ok(record) => records.push(TransportRecord::from(record)),
                Err(err) => {
                    skipped_rows += 1;
                    warn!(position = err.position, error = %err.message, "Skipping undecodable transaction row");
                }
            }
        }

        debug!(records = records.len(), skipped_rows, "Extraction completed");

        Ok(Extraction { batch: SyncBatch::new(self.identity.clone(), records), skipped_rows })
    }
}
