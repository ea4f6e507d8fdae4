//! Extract-transform-forward cycle

pub mod extractor;
pub mod ports;
pub mod service;
