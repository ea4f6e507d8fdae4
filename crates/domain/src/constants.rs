//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Scheduling
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOOKBACK_HOURS: u64 = 12;

// Wire format
pub const TRANSPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PUMPS_ENDPOINT_PATH: &str = "pumps";

// Data source
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_SCHEMA: &str = "dah";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
