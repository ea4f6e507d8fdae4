//! Process-level helpers

pub mod logging;

pub use logging::{bootstrap_subscriber, env_filter, init_tracing};
