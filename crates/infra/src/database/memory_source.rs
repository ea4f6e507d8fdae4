//! In-memory transaction source
//!
//! Evaluates the eligibility predicate in Rust over a list of full source
//! rows. Used by tests and by dry runs that should not touch a database.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use pumpsync_core::TransactionSource;
use pumpsync_domain::{ExtractionCriteria, Result, RowResult, SourceTransaction};

/// Transaction source backed by a vector of rows.
pub struct InMemoryTransactionSource {
    rows: RwLock<Vec<SourceTransaction>>,
    now: RwLock<Option<NaiveDateTime>>,
}

impl InMemoryTransactionSource {
    pub fn new(rows: Vec<SourceTransaction>) -> Self {
        Self { rows: RwLock::new(rows), now: RwLock::new(None) }
    }

    /// Pin the clock used for the window. Unpinned sources use local time.
    pub fn with_now(self, now: NaiveDateTime) -> Self {
        *self.now.write() = Some(now);
        self
    }

    pub fn set_now(&self, now: NaiveDateTime) {
        *self.now.write() = Some(now);
    }

    pub fn push(&self, row: SourceTransaction) {
        self.rows.write().push(row);
    }

    /// Flip the processed flag of a transaction, as the site system would
    /// after importing it. Returns whether the id was found.
    pub fn mark_processed(&self, transaction_id: i64) -> bool {
        let mut rows = self.rows.write();
        let mut found = false;
        for row in rows.iter_mut().filter(|r| r.record.transaction_id == transaction_id) {
            row.record.processed_flag = 1;
            found = true;
        }
        found
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn current_time(&self) -> NaiveDateTime {
        (*self.now.read()).unwrap_or_else(|| chrono::Local::now().naive_local())
    }
}

impl Default for InMemoryTransactionSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl TransactionSource for InMemoryTransactionSource {
    async fn fetch_eligible(&self, criteria: &ExtractionCriteria) -> Result<Vec<RowResult>> {
        let now = self.current_time();

        let mut eligible: Vec<SourceTransaction> =
            self.rows.read().iter().filter(|row| criteria.admits(row, now)).cloned().collect();

        // Most recently processed first; stable for ties.
        eligible.sort_by(|a, b| b.processed_at.cmp(&a.processed_at));

        Ok(eligible.into_iter().map(|row| Ok(row.record)).collect())
    }
}
