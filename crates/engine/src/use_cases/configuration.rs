//! Load configuration use case - reads `key: value` lines into a `Configuration`.
//!
//! Grammar, one option per line:
//!
//! ```text
//! minimum: 1
//! maximum: 100
//! attempts: 10
//! ```
//!
//! Any unknown key, missing separator, non-integer value or non-UTF-8 line
//! aborts loading.
//! Lines are applied in order, so a repeated key keeps its last value.
//! Consistency is NOT checked here - that is the caller's job.

use std::io::{self, BufRead};
use std::sync::Arc;

use drawnumber_domain::{Configuration, ConfigurationBuilder};

use crate::infrastructure::ports::ConfigSourcePort;

/// Why configuration loading failed.
///
/// `SourceUnavailable` is about the medium; every other variant is about
/// malformed content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration source {source_name} unavailable: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Line {line_number}: option '{key}' doesn't exist")]
    UnknownKey { line_number: usize, key: String },

    #[error("Line {line_number}: expected 'key: value', got '{line}'")]
    MalformedLine { line_number: usize, line: String },

    #[error("Line {line_number}: invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        line_number: usize,
        key: String,
        value: String,
        reason: String,
    },

    #[error("Line {line_number}: not valid UTF-8")]
    InvalidEncoding { line_number: usize },
}

impl ConfigLoadError {
    /// True when the source could not be opened or read at all.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }

    /// True when the source was readable but its content is not valid.
    pub fn is_malformed(&self) -> bool {
        !self.is_source_unavailable()
    }
}

/// Loads the game configuration from a configuration source.
pub struct LoadConfiguration {
    source: Arc<dyn ConfigSourcePort>,
}

impl LoadConfiguration {
    pub fn new(source: Arc<dyn ConfigSourcePort>) -> Self {
        Self { source }
    }

    /// Open the source and parse every line.
    ///
    /// The returned configuration may still be inconsistent.
    pub fn execute(&self) -> Result<Configuration, ConfigLoadError> {
        let source_name = self.source.describe();
        tracing::debug!(source = %source_name, "Loading configuration");

        let reader = self
            .source
            .open()
            .map_err(|e| ConfigLoadError::SourceUnavailable {
                source_name: source_name.clone(),
                message: e.to_string(),
            })?;

        let config = parse_configuration(reader, &source_name)?;
        tracing::info!(
            source = %source_name,
            minimum = ?config.minimum(),
            maximum = ?config.maximum(),
            attempts = ?config.attempts(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Parse `key: value` lines into a configuration.
///
/// `source_name` only labels read failures.
pub fn parse_configuration(
    reader: impl BufRead,
    source_name: &str,
) -> Result<Configuration, ConfigLoadError> {
    let mut builder = Configuration::builder();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => ConfigLoadError::InvalidEncoding { line_number },
            _ => ConfigLoadError::SourceUnavailable {
                source_name: source_name.to_string(),
                message: e.to_string(),
            },
        })?;
        apply_line(&mut builder, line_number, &line)?;
    }

    Ok(builder.build())
}

fn apply_line(
    builder: &mut ConfigurationBuilder,
    line_number: usize,
    line: &str,
) -> Result<(), ConfigLoadError> {
    let Some((key, value)) = line.split_once(':') else {
        return Err(ConfigLoadError::MalformedLine {
            line_number,
            line: line.to_string(),
        });
    };
    let key = key.trim();
    let value = value.trim();

    let parse = || {
        value
            .parse::<i32>()
            .map_err(|e| ConfigLoadError::InvalidValue {
                line_number,
                key: key.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
    };

    match key {
        "minimum" => builder.set_min(parse()?),
        "maximum" => builder.set_max(parse()?),
        "attempts" => builder.set_attempts(parse()?),
        other => {
            return Err(ConfigLoadError::UnknownKey {
                line_number,
                key: other.to_string(),
            })
        }
    };
    Ok(())
}
