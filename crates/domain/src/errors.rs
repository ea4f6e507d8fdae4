//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PumpSync
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PumpSyncError {
    #[error("Database error: {0}")]
    Database(String),

    /// The session could not switch to the configured role. Unrecoverable.
    #[error("Role switch failed: {0}")]
    RoleSwitch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Delivery rejected with HTTP status {status}")]
    Rejected { status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PumpSyncError {
    /// Whether the process should stop polling after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RoleSwitch(_))
    }

    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::RoleSwitch(_) => "role_switch",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Rejected { .. } => "rejected",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for PumpSync operations
pub type Result<T> = std::result::Result<T, PumpSyncError>;
