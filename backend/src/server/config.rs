//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use userbank::domain::ports::{BatchSize, RecordSource};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) initial_batch_size: BatchSize,
    pub(crate) source: Arc<dyn RecordSource>,
}

impl ServerConfig {
    /// Construct a server configuration around the record source every
    /// screen fetches from.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        initial_batch_size: BatchSize,
        source: Arc<dyn RecordSource>,
    ) -> Self {
        Self {
            bind_addr,
            initial_batch_size,
            source,
        }
    }
}
