//! Application configuration loaded via OrthoConfig.
//!
//! Values layer from defaults, an optional configuration file, `USERBANK_*`
//! environment variables, and command-line flags, in increasing precedence.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{BatchSize, BatchSizeError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SOURCE_URL: &str = "https://random-data-api.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_INITIAL_BATCH_SIZE: usize = 10;
const DEFAULT_SYNTHETIC_SEED: u64 = 42;

/// Errors raised when settings hold values the server cannot use.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The host is not an IP address.
    #[error("invalid bind host '{host}': {source}")]
    Host {
        /// Configured host.
        host: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// The initial batch size is out of range.
    #[error("invalid initial batch size: {0}")]
    InitialBatchSize(#[from] BatchSizeError),
    /// The remote source base URL does not parse.
    #[error("invalid source url '{url}': {source}")]
    SourceUrl {
        /// Configured URL.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },
}

/// Settings for the HTTP server and the record source it fetches from.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERBANK")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Serve generated data instead of calling the remote API.
    #[ortho_config(default = false)]
    pub synthetic: bool,
    /// Seed for the synthetic source.
    pub synthetic_seed: Option<u64>,
    /// Base URL of the remote random-data API.
    pub source_url: Option<String>,
    /// Per-request timeout for the remote source, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Records loaded into each screen at startup.
    pub initial_batch_size: Option<usize>,
}

impl AppSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Host`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self.host().parse().map_err(|source| SettingsError::Host {
            host: self.host().to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Seed for the synthetic source.
    pub fn synthetic_seed(&self) -> u64 {
        self.synthetic_seed.unwrap_or(DEFAULT_SYNTHETIC_SEED)
    }

    /// Base URL of the remote source.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::SourceUrl`] when the URL does not parse.
    pub fn source_url(&self) -> Result<url::Url, SettingsError> {
        let raw = self.source_url.as_deref().unwrap_or(DEFAULT_SOURCE_URL);
        url::Url::parse(raw).map_err(|source| SettingsError::SourceUrl {
            url: raw.to_owned(),
            source,
        })
    }

    /// Remote request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Records loaded into each screen at startup.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InitialBatchSize`] for zero or oversized
    /// values.
    pub fn initial_batch_size(&self) -> Result<BatchSize, SettingsError> {
        Ok(BatchSize::new(
            self.initial_batch_size
                .unwrap_or(DEFAULT_INITIAL_BATCH_SIZE),
        )?)
    }
}
