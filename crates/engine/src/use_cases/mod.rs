//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area. Use cases orchestrate
//! ports and domain types; the controller in `app` composes them.

pub mod configuration;

// Re-export main types
pub use configuration::{parse_configuration, ConfigLoadError, LoadConfiguration};
