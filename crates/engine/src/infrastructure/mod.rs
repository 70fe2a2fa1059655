//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config_source;
pub mod ports;
pub mod random;
pub mod views;
