//! Source-side transaction types
//!
//! These types mirror the rows of the site database. They are produced fresh
//! by every query and never outlive a single sync cycle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fuel dispensing transaction as read from the data source.
///
/// Only the columns that end up in the outbound payload are carried here;
/// the filter columns live on [`SourceTransaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: i64,
    /// Dispensing time, in whatever zone the source stores it.
    pub timestamp: NaiveDateTime,
    pub volume: f64,
    pub unit_price: f64,
    pub total_value: f64,
    pub processed_flag: i32,
    pub nozzle_label: String,
    pub nozzle_number: i32,
    pub company_label: String,
}

/// Full source row including the columns the eligibility predicate reads.
///
/// SQL-backed sources filter in the database and never materialize this
/// type; in-memory sources keep it so the predicate can run in Rust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTransaction {
    pub record: TransactionRecord,
    pub cancelled_flag: i32,
    pub record_type: i32,
    pub company_id: i64,
    /// Time the site system processed the transaction; drives ordering.
    pub processed_at: NaiveDateTime,
}

impl SourceTransaction {
    /// Wrap a record as an eligible-looking row for the given tenant.
    ///
    /// Flags default to zero and `processed_at` to the record timestamp.
    pub fn new(record: TransactionRecord, company_id: i64) -> Self {
        let processed_at = record.timestamp;
        Self { record, cancelled_flag: 0, record_type: 0, company_id, processed_at }
    }

    pub fn with_cancelled_flag(mut self, flag: i32) -> Self {
        self.cancelled_flag = flag;
        self
    }

    pub fn with_record_type(mut self, record_type: i32) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn with_processed_at(mut self, processed_at: NaiveDateTime) -> Self {
        self.processed_at = processed_at;
        self
    }
}

/// A single row that could not be decoded into a [`TransactionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("row {position} could not be decoded: {message}")]
pub struct RowDecodeError {
    /// Zero-based position of the row in the result set.
    pub position: usize,
    pub message: String,
}

impl RowDecodeError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self { position, message: message.into() }
    }
}

/// Outcome of decoding one row of an eligible-transactions query.
pub type RowResult = std::result::Result<TransactionRecord, RowDecodeError>;
