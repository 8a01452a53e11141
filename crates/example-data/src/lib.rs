//! Deterministic synthetic user and bank records for demonstration purposes.
//!
//! This crate produces believable, reproducible records shaped like the
//! payloads of the public random-data API, so the backend can run without
//! network access. It is deliberately independent of backend domain types to
//! avoid circular dependencies; the backend converts the seeds at the point of
//! use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Seeded generation of user and bank batches
//! - Identifiers that stay unique across successive batches
//! - Username sanitisation and validation
//! - ABA routing numbers with a valid check digit
//! - Well-formed SWIFT/BIC codes
//!
//! # Example
//!
//! ```
//! use example_data::{ExampleDataGenerator, is_valid_routing_number};
//!
//! let mut generator = ExampleDataGenerator::new(42);
//! let users = generator.users(3).expect("generation succeeds");
//! let banks = generator.banks(2);
//!
//! assert_eq!(users.len(), 3);
//! assert!(banks.iter().all(|bank| is_valid_routing_number(&bank.routing_number)));
//! ```

mod error;
mod generator;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::ExampleDataGenerator;
pub use seed::{ExampleBankSeed, ExampleUserSeed};
pub use validation::{
    USERNAME_MAX, USERNAME_MIN, is_valid_routing_number, is_valid_swift_bic, is_valid_username,
};
