//! Unified error types for the domain layer
//!
//! Provides a common error type for operations that build or rebuild domain
//! state, so adapters never have to fall back to `String` or `anyhow`.

use thiserror::Error;

use crate::value_objects::ConfigurationError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configuration failed its consistency check
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }
}
