//! Game configuration value object and its builder
//!
//! A `Configuration` is a snapshot of whatever the builder collected. It is
//! NOT valid by construction: the caller must run `is_consistent()` (or
//! `validate()`) before handing it to a game.
//!
//! Fields that were never set stay `None`, so a missing field and a bad range
//! are reported as different `ConfigurationError` variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration cannot be used to start a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A field was never provided
    #[error("Missing configuration field: {0}")]
    MissingField(&'static str),
    /// The range does not satisfy minimum < maximum
    #[error("Empty range: minimum {minimum} must be lower than maximum {maximum}")]
    EmptyRange { minimum: i32, maximum: i32 },
    /// The attempt budget is not positive
    #[error("Invalid attempts: {attempts} (must be greater than zero)")]
    NoAttempts { attempts: i32 },
}

/// Inclusive guessing range plus attempt budget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    minimum: Option<i32>,
    maximum: Option<i32>,
    attempts: Option<i32>,
}

impl Configuration {
    /// Start building a configuration
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    #[inline]
    pub fn minimum(&self) -> Option<i32> {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> Option<i32> {
        self.maximum
    }

    #[inline]
    pub fn attempts(&self) -> Option<i32> {
        self.attempts
    }

    /// True iff every field is set, `minimum < maximum` and `attempts > 0`.
    ///
    /// No stricter rule is applied: negative bounds and a range of width one
    /// are both accepted.
    pub fn is_consistent(&self) -> bool {
        self.validate().is_ok()
    }

    /// Same predicate as `is_consistent`, reporting the first failed cause.
    ///
    /// Missing fields are checked before the inequalities.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let minimum = self
            .minimum
            .ok_or(ConfigurationError::MissingField("minimum"))?;
        let maximum = self
            .maximum
            .ok_or(ConfigurationError::MissingField("maximum"))?;
        let attempts = self
            .attempts
            .ok_or(ConfigurationError::MissingField("attempts"))?;

        if minimum >= maximum {
            return Err(ConfigurationError::EmptyRange { minimum, maximum });
        }
        if attempts <= 0 {
            return Err(ConfigurationError::NoAttempts { attempts });
        }
        Ok(())
    }
}

/// Accumulates configuration fields; a repeated setter overwrites
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    minimum: Option<i32>,
    maximum: Option<i32>,
    attempts: Option<i32>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_min(&mut self, minimum: i32) -> &mut Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn set_max(&mut self, maximum: i32) -> &mut Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn set_attempts(&mut self, attempts: i32) -> &mut Self {
        self.attempts = Some(attempts);
        self
    }

    /// Snapshot the collected fields. Performs no validation.
    pub fn build(&self) -> Configuration {
        Configuration {
            minimum: self.minimum,
            maximum: self.maximum,
            attempts: self.attempts,
        }
    }
}
