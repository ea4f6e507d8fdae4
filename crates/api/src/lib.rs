//! # PumpSync App
//!
//! Process layer - wiring and entry point support for the `pumpsync` binary.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Logging initialisation
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod utils;

// Re-export for convenience
pub use context::*;
