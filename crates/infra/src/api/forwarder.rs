//! Pumps forwarder
//!
//! Serializes a [`SyncBatch`] and POSTs it to `<base URL>/pumps` with a
//! single attempt. Only `201 Created` counts as delivered; every other
//! outcome drops the batch and is reported to the caller.

use std::time::Duration;

use async_trait::async_trait;
use pumpsync_core::{BatchSink, DeliveryReceipt};
use pumpsync_domain::{DeliveryConfig, PumpSyncError, Result, SyncBatch};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use tracing::{info, instrument, warn};

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Configuration for the pumps forwarder
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Absolute URL of the pumps endpoint
    pub endpoint: Url,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl ForwarderConfig {
    /// Derive the forwarder settings from the delivery section of the config.
    ///
    /// # Errors
    ///
    /// Returns `PumpSyncError::Config` if the base URL is invalid.
    pub fn from_delivery(delivery: &DeliveryConfig) -> Result<Self> {
        Ok(Self { endpoint: delivery.endpoint()?, request_timeout: delivery.request_timeout() })
    }
}

/// Delivers sync batches to the collection API.
pub struct PumpsForwarder {
    http_client: HttpClient,
    config: ForwarderConfig,
}

impl PumpsForwarder {
    /// Create a forwarder with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: ForwarderConfig) -> Result<Self> {
        let http_client = HttpClient::builder().maybe_timeout(config.request_timeout).build()?;
        Ok(Self { http_client, config })
    }

    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    async fn post(&self, batch: &SyncBatch) -> Result<DeliveryReceipt> {
        let body = serde_json::to_vec(batch).map_err(|e| PumpSyncError::from(InfraError::from(e)))?;

        info!(
            organization = %batch.identity().organization_code,
            gas_station = %batch.identity().gas_station_code,
            records = batch.len(),
            "Sending pump data"
        );

        let request = self
            .http_client
            .request(Method::POST, self.config.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        let response = self.http_client.send(request).await?;
        let status = response.status();

        if status != StatusCode::CREATED {
            return Err(PumpSyncError::Rejected { status: status.as_u16() });
        }

        match serde_json::to_string_pretty(batch) {
            Ok(payload) => info!(payload = %payload, "Pump data sent successfully"),
            Err(err) => warn!(error = %err, "Pump data sent; payload could not be rendered for the log"),
        }

        Ok(DeliveryReceipt { status: status.as_u16(), records: batch.len() })
    }
}

#[async_trait]
impl BatchSink for PumpsForwarder {
    #[instrument(skip(self, batch), fields(endpoint = %self.config.endpoint, records = batch.len()))]
    async fn deliver(&self, batch: &SyncBatch) -> Result<DeliveryReceipt> {
        let result = self.post(batch).await;

        if let Err(err) = &result {
            match err {
                PumpSyncError::Rejected { status } => {
                    warn!(status = *status, "Collection API did not accept pump data");
                }
                other => warn!(error = %other, "Failed to send pump data"),
            }
        }

        result
    }
}
