//! # PumpSync Domain
//!
//! Business domain types and models for PumpSync.
//!
//! This crate contains:
//! - Pump transaction types (source rows, transport records, sync batches)
//! - Extraction criteria (the eligibility predicate)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other PumpSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
