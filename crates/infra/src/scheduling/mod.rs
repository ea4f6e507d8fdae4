//! Periodic scheduling of sync cycles
//!
//! The scheduler owns its background task explicitly: `start` spawns it,
//! `stop` cancels it through a cancellation token and joins it, and `wait`
//! resolves when polling ends on its own after a fatal cycle.

pub mod error;
pub mod sync_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use sync_scheduler::{SyncScheduler, SyncSchedulerConfig};
