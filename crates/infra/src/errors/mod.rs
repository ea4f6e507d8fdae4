//! Infrastructure error handling
//!
//! External crate errors are converted into the domain error through the
//! [`InfraError`] newtype so the domain crate stays free of I/O dependencies.

mod conversions;

pub use conversions::InfraError;
