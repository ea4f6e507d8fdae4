//! Transaction sources
//!
//! `postgres_source` reads the site database; `memory_source` evaluates the
//! same predicate over rows held in memory.

pub mod memory_source;
pub mod postgres_source;

pub use memory_source::InMemoryTransactionSource;
pub use postgres_source::{eligible_transactions_query, quote_identifier, PostgresTransactionSource};
