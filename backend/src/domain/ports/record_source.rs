//! Driven port for fetching freshly generated record batches.
//!
//! The domain owns the request shape (entity kind and batch size) and the
//! error contract so screens stay independent of the transport.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{EntityKind, RecordBatch};

/// Number of records requested in one fetch.
///
/// ## Invariants
/// - Between 1 and [`BatchSize::MAX`] inclusive.
///
/// # Examples
/// ```
/// use userbank::domain::ports::BatchSize;
///
/// assert_eq!(BatchSize::new(10).expect("valid size").get(), 10);
/// assert!(BatchSize::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchSize(usize);

/// Validation errors returned when constructing [`BatchSize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchSizeError {
    /// Zero records were requested.
    #[error("batch size must be at least 1")]
    Zero,
    /// More records were requested than one fetch may return.
    #[error("batch size must be at most {max}, got {requested}")]
    TooLarge {
        /// Upper bound.
        max: usize,
        /// Requested count.
        requested: usize,
    },
}

impl BatchSize {
    /// Largest batch the remote source serves in one request.
    pub const MAX: usize = 100;

    /// Validate a requested record count.
    pub fn new(count: usize) -> Result<Self, BatchSizeError> {
        if count == 0 {
            return Err(BatchSizeError::Zero);
        }
        if count > Self::MAX {
            return Err(BatchSizeError::TooLarge {
                max: Self::MAX,
                requested: count,
            });
        }
        Ok(Self(count))
    }

    /// Requested record count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced while fetching a batch. Any of them leaves the requesting
/// screen unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSourceError {
    /// Network transport failed before receiving a response.
    #[error("record source transport failed: {message}")]
    Transport { message: String },
    /// The request exceeded its timeout.
    #[error("record source timeout: {message}")]
    Timeout { message: String },
    /// The source rate-limited the request.
    #[error("record source rate limited request: {message}")]
    RateLimited { message: String },
    /// The response could not be decoded into a full batch.
    #[error("record source response decode failed: {message}")]
    Decode { message: String },
    /// The source rejected the request.
    #[error("record source rejected request: {message}")]
    InvalidRequest { message: String },
    /// The offline generator could not produce the batch.
    #[error("record generation failed: {message}")]
    Generation { message: String },
    /// The batch carries the wrong entity kind.
    #[error("record source returned {actual} when {expected} were requested")]
    KindMismatch {
        expected: EntityKind,
        actual: EntityKind,
    },
}

impl RecordSourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn kind_mismatch(expected: EntityKind, actual: EntityKind) -> Self {
        Self::KindMismatch { expected, actual }
    }
}

/// Port for fetching record batches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch exactly `size` new records of `kind`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use userbank::domain::EntityKind;
    /// use userbank::domain::ports::{BatchSize, RecordSource};
    ///
    /// let batch = source
    ///     .fetch_batch(EntityKind::Banks, BatchSize::new(2)?)
    ///     .await?;
    /// assert_eq!(batch.len(), 2);
    /// ```
    async fn fetch_batch(
        &self,
        kind: EntityKind,
        size: BatchSize,
    ) -> Result<RecordBatch, RecordSourceError>;
}
