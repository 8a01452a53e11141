//! Error types for the example-data crate.
//!
//! Generation is infallible for banks; users can fail only when the fake name
//! corpus cannot yield a username that satisfies validation.

use thiserror::Error;

/// Errors that can occur during record generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid username after maximum retries.
    #[error("failed to generate valid username after {max_attempts} attempts")]
    UsernameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}
