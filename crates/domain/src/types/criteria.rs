//! Eligibility predicate for pump transactions
//!
//! A transaction is eligible iff it is not yet posted, not cancelled, of the
//! regular type, belongs to the configured tenant, and was dispensed inside
//! the trailing lookback window (inclusive lower bound). There is no cursor:
//! the same window is re-read every cycle.

use chrono::{NaiveDateTime, TimeDelta};

use super::transaction::SourceTransaction;
use crate::constants::DEFAULT_LOOKBACK_HOURS;
use crate::errors::{PumpSyncError, Result};

/// Tenant scope and time window for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionCriteria {
    company_id: i64,
    lookback: TimeDelta,
}

impl ExtractionCriteria {
    pub fn new(company_id: i64, lookback: TimeDelta) -> Self {
        Self { company_id, lookback }
    }

    /// Build criteria from a lookback expressed in whole hours.
    ///
    /// # Errors
    ///
    /// Returns `PumpSyncError::Config` if the window is zero or does not fit
    /// in a `TimeDelta`.
    pub fn from_hours(company_id: i64, hours: u64) -> Result<Self> {
        if hours == 0 {
            return Err(PumpSyncError::Config("lookback window must be positive".into()));
        }
        let lookback = i64::try_from(hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .ok_or_else(|| PumpSyncError::Config(format!("lookback of {hours}h is too large")))?;
        Ok(Self::new(company_id, lookback))
    }

    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    pub fn lookback(&self) -> TimeDelta {
        self.lookback
    }

    /// Lookback in seconds, as bound into SQL interval arithmetic.
    #[allow(clippy::cast_precision_loss)]
    pub fn lookback_seconds(&self) -> f64 {
        self.lookback.num_microseconds().map_or_else(
            || self.lookback.num_seconds() as f64,
            |micros| micros as f64 / 1_000_000.0,
        )
    }

    /// Oldest dispensing time still inside the window.
    pub fn window_start(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - self.lookback
    }

    /// Evaluate the eligibility predicate against a full source row.
    pub fn admits(&self, row: &SourceTransaction, now: NaiveDateTime) -> bool {
        row.record.processed_flag == 0
            && row.cancelled_flag == 0
            && row.record_type == 0
            && row.company_id == self.company_id
            && row.record.timestamp >= self.window_start(now)
    }
}

impl Default for ExtractionCriteria {
    fn default() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let hours = DEFAULT_LOOKBACK_HOURS as i64;
        Self { company_id: 1, lookback: TimeDelta::hours(hours) }
    }
}
