//! # PumpSync Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Transaction sources (PostgreSQL, in-memory)
//! - HTTP client and the pumps forwarder
//! - The periodic sync scheduler
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `pumpsync-core`
//! - Depends on `pumpsync-domain` and `pumpsync-core`
//! - Contains all "impure" code (database, network, filesystem)

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod scheduling;

// Re-export commonly used items
pub use api::{ForwarderConfig, PumpsForwarder};
pub use database::{InMemoryTransactionSource, PostgresTransactionSource};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use scheduling::{SchedulerError, SchedulerResult, SyncScheduler, SyncSchedulerConfig};
