//! Conversions from external infrastructure errors into domain errors.

use pumpsync_domain::PumpSyncError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use tokio_postgres::Error as PgError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PumpSyncError);

impl From<InfraError> for PumpSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PumpSyncError> for InfraError {
    fn from(value: PumpSyncError) -> Self {
        InfraError(value)
    }
}

/// Per-source conversion logic behind the `From` impls below.
trait IntoPumpSyncError {
    fn into_pumpsync(self) -> PumpSyncError;
}

/* -------------------------------------------------------------------------- */
/* tokio_postgres::Error → PumpSyncError */
/* -------------------------------------------------------------------------- */

impl IntoPumpSyncError for PgError {
    fn into_pumpsync(self) -> PumpSyncError {
        if let Some(db_error) = self.as_db_error() {
            return PumpSyncError::Database(format!(
                "{} (SQLSTATE {}): {}",
                db_error.severity(),
                db_error.code().code(),
                db_error.message()
            ));
        }

        if self.is_closed() {
            return PumpSyncError::Database("database connection closed".into());
        }

        PumpSyncError::Database(self.to_string())
    }
}

impl From<PgError> for InfraError {
    fn from(value: PgError) -> Self {
        InfraError(value.into_pumpsync())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PumpSyncError */
/* -------------------------------------------------------------------------- */

impl IntoPumpSyncError for HttpError {
    fn into_pumpsync(self) -> PumpSyncError {
        if self.is_timeout() {
            return PumpSyncError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PumpSyncError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return PumpSyncError::Rejected { status: status.as_u16() };
        }

        if self.is_builder() {
            return PumpSyncError::Config(format!("invalid HTTP request: {self}"));
        }

        PumpSyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_pumpsync())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → PumpSyncError */
/* -------------------------------------------------------------------------- */

impl IntoPumpSyncError for JsonError {
    fn into_pumpsync(self) -> PumpSyncError {
        PumpSyncError::Serialization(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_pumpsync())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
