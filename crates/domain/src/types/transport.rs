//! Outbound payload types
//!
//! Field names on the wire follow the collection API contract, which is why
//! the serde renames below are explicit.

use serde::{Deserialize, Serialize};

use super::transaction::TransactionRecord;
use crate::constants::TRANSPORT_DATE_FORMAT;

/// Organization and gas station this process reports for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteIdentity {
    #[serde(alias = "organization_code")]
    pub organization_code: String,
    #[serde(alias = "gas_station_code")]
    pub gas_station_code: String,
}

impl SiteIdentity {
    pub fn new(organization_code: impl Into<String>, gas_station_code: impl Into<String>) -> Self {
        Self {
            organization_code: organization_code.into(),
            gas_station_code: gas_station_code.into(),
        }
    }
}

/// One pump transaction in the shape the collection API expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRecord {
    #[serde(rename = "gasStationTransactionID")]
    pub gas_station_transaction_id: i64,
    pub quantity: f64,
    pub unit_value: f64,
    pub total_value: f64,
    pub processed: i32,
    /// Rendered as `YYYY-MM-DD HH:MM:SS`, no zone conversion.
    pub date: String,
    pub pump_number: i32,
    pub fuel_name: String,
    pub company_name: String,
}

impl From<TransactionRecord> for TransportRecord {
    fn from(record: TransactionRecord) -> Self {
        Self {
            gas_station_transaction_id: record.transaction_id,
            quantity: record.volume,
            unit_value: record.unit_price,
            total_value: record.total_value,
            processed: record.processed_flag,
            date: record.timestamp.format(TRANSPORT_DATE_FORMAT).to_string(),
            pump_number: record.nozzle_number,
            fuel_name: record.nozzle_label,
            company_name: record.company_label,
        }
    }
}

/// Per-cycle unit of delivery: the site identity plus every mapped record.
///
/// Serializes flat, as `{organizationCode, gasStationCode, pumpRowsData}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncBatch {
    #[serde(flatten)]
    identity: SiteIdentity,
    #[serde(rename = "pumpRowsData")]
    records: Vec<TransportRecord>,
}

impl SyncBatch {
    pub fn new(identity: SiteIdentity, records: Vec<TransportRecord>) -> Self {
        Self { identity, records }
    }

    pub fn identity(&self) -> &SiteIdentity {
        &self.identity
    }

    pub fn records(&self) -> &[TransportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
