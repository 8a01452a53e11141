//! Random-data outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `RecordSource`
//! port against the public random-data API.

mod dto;
mod http_source;

pub use http_source::RandomDataHttpSource;
