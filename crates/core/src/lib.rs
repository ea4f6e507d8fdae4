//! # PumpSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the data source and the delivery
//!   endpoint
//! - The extractor that turns eligible rows into a sync batch
//! - The sync service that runs one extract-forward cycle
//!
//! ## Architecture Principles
//! - Only depends on `pumpsync-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod sync;

// Re-export specific items to avoid ambiguity
pub use sync::extractor::{Extraction, Extractor};
pub use sync::ports::{BatchSink, DeliveryReceipt, TransactionSource};
pub use sync::service::{CycleOutcome, SyncService};
