//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_DB_PORT, DEFAULT_DB_SCHEMA, DEFAULT_LOG_LEVEL, DEFAULT_LOOKBACK_HOURS,
    DEFAULT_SYNC_INTERVAL_SECS, PUMPS_ENDPOINT_PATH,
};
use crate::errors::{PumpSyncError, Result};
use crate::types::{ExtractionCriteria, SiteIdentity};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteIdentity,
    pub database: DatabaseConfig,
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Site database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Role assumed with `SET SESSION AUTHORIZATION` before querying.
    pub role: String,
    /// Tenant (`cdempresa`) every query is scoped to.
    pub company_id: i64,
    #[serde(default = "default_db_schema")]
    pub schema: String,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

/// Collection API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// What a tick does when the previous cycle has not finished yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Start a new cycle regardless; cycles may run concurrently.
    #[default]
    Allow,
    /// Skip the tick while any cycle is in flight.
    SkipIfBusy,
}

/// Sync cycle configuration
///
/// Any field left out of a config file takes its value from [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub interval_seconds: u64,
    pub lookback_hours: u64,
    pub overlap: OverlapPolicy,
    pub cycle_timeout_secs: Option<u64>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

fn default_db_port() -> u16 {
    DEFAULT_DB_PORT
}

fn default_db_schema() -> String {
    DEFAULT_DB_SCHEMA.to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_SYNC_INTERVAL_SECS,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            overlap: OverlapPolicy::default(),
            cycle_timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), format: LogFormat::default() }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn cycle_timeout(&self) -> Option<Duration> {
        self.cycle_timeout_secs.map(Duration::from_secs)
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

impl DeliveryConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Absolute URL of the pumps collection endpoint.
    ///
    /// # Errors
    ///
    /// Returns `PumpSyncError::Config` if the base URL is not an absolute
    /// http(s) URL.
    pub fn endpoint(&self) -> Result<Url> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|e| PumpSyncError::Config(format!("Invalid base URL: {e}")))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(PumpSyncError::Config(format!(
                "Unsupported base URL scheme: {}",
                base.scheme()
            )));
        }

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(PUMPS_ENDPOINT_PATH)
            .map_err(|e| PumpSyncError::Config(format!("Invalid endpoint URL: {e}")))
    }
}

impl Config {
    /// Extraction criteria derived from the tenant and lookback settings.
    ///
    /// # Errors
    ///
    /// Returns `PumpSyncError::Config` if the lookback is invalid.
    pub fn extraction_criteria(&self) -> Result<ExtractionCriteria> {
        ExtractionCriteria::from_hours(self.database.company_id, self.sync.lookback_hours)
    }

    /// Check the values a loader cannot enforce through types alone.
    ///
    /// # Errors
    ///
    /// Returns `PumpSyncError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("site.organization_code", &self.site.organization_code)?;
        require_non_empty("site.gas_station_code", &self.site.gas_station_code)?;
        require_non_empty("database.host", &self.database.host)?;
        require_non_empty("database.database", &self.database.database)?;
        require_non_empty("database.user", &self.database.user)?;
        require_non_empty("database.role", &self.database.role)?;
        require_non_empty("database.schema", &self.database.schema)?;

        if self.sync.interval_seconds == 0 {
            return Err(PumpSyncError::Config("sync.interval_seconds must be positive".into()));
        }

        self.extraction_criteria()?;
        self.delivery.endpoint()?;
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PumpSyncError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}
