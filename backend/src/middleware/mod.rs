//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently trace
//! identifier propagation.

pub mod trace;

pub use trace::Trace;
