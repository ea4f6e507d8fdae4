//! Domain types and models
//!
//! Pump transactions flow through three shapes per cycle: the raw
//! [`TransactionRecord`] read from the site database, the outbound
//! [`TransportRecord`], and the [`SyncBatch`] that carries them with the
//! site identity.

pub mod criteria;
pub mod transaction;
pub mod transport;

pub use criteria::ExtractionCriteria;
pub use transaction::{RowDecodeError, RowResult, SourceTransaction, TransactionRecord};
pub use transport::{SiteIdentity, SyncBatch, TransportRecord};
