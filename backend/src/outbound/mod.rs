//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **random_data**: reqwest client for the public random-data API
//! - **synthetic**: in-process generator for offline runs and tests
//!
//! Adapters are thin translators between transport representations and
//! domain records. They contain no business logic.

pub mod random_data;
pub mod synthetic;
