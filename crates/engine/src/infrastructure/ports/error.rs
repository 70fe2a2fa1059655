//! Error types for port operations.

/// Configuration source failures - the source itself, not its content.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigSourceError {
    /// The source could not be opened.
    #[error("Cannot open {name}: {message}")]
    Unavailable { name: String, message: String },
}

impl ConfigSourceError {
    /// Create an Unavailable error with the source name for context.
    pub fn unavailable(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Unavailable {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
