//! Collection API integration
//!
//! Delivers sync batches to the central collection service.

pub mod forwarder;

pub use forwarder::{ForwarderConfig, PumpsForwarder};
