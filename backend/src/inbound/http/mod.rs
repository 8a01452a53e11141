//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod home;
pub mod schemas;
pub mod screens;
pub mod state;

pub use error::ApiResult;
