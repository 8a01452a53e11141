//! Domain ports defining the edges of the hexagon.
//!
//! The only driven port is [`RecordSource`]; adapters map their failures into
//! [`RecordSourceError`] variants.

mod record_source;

#[cfg(test)]
pub use record_source::MockRecordSource;
pub use record_source::{BatchSize, BatchSizeError, RecordSource, RecordSourceError};
