//! DrawNumber aggregate - the guess-the-number state machine
//!
//! # State Machine
//!
//! ```text
//!            guess == secret
//!   Active ------------------> Won
//!     |
//!     | remaining attempts hit 0
//!     v
//!   Lost
//!
//!   reset(): any state -> Active (new secret, full budget)
//! ```
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: state is only changed through `attempt` and `reset`
//! - **Valid by construction**: `new()` refuses inconsistent configurations
//! - **Injected randomness**: callers pass a `draw(min, max)` closure, so the
//!   domain never owns an RNG

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DomainError;
use crate::value_objects::{Configuration, ConfigurationError, DrawResult};

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Accepting guesses
    Active,
    /// The secret was guessed
    Won,
    /// The attempt budget ran out
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Active)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Active => write!(f, "active"),
            GamePhase::Won => write!(f, "won"),
            GamePhase::Lost => write!(f, "lost"),
        }
    }
}

/// A guess the game refused without consuming an attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("Guess {guess} is outside [{minimum}, {maximum}]")]
    OutOfRange {
        guess: i32,
        minimum: i32,
        maximum: i32,
    },
    #[error("The game is over ({phase}); reset to play again")]
    GameOver { phase: GamePhase },
}

/// A single guess-the-number game
///
/// # Invariants
///
/// - `minimum < maximum`, `attempts > 0` (checked in `new`)
/// - `secret` is always within `[minimum, maximum]`
/// - `remaining_attempts` is in `0..=attempts`
/// - `phase` is `Active` iff no win yet and `remaining_attempts > 0`
#[derive(Debug, Clone)]
pub struct DrawNumber {
    minimum: i32,
    maximum: i32,
    attempts: i32,
    remaining_attempts: i32,
    secret: i32,
    phase: GamePhase,
}

impl DrawNumber {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a game from a consistent configuration.
    ///
    /// `draw(min, max)` must return a value uniformly drawn from the inclusive
    /// range. It is called once here and once per `reset`.
    ///
    /// # Errors
    ///
    /// - `DomainError::Configuration` if the configuration is not consistent
    /// - `DomainError::Constraint` if `draw` returns a value outside the range
    pub fn new(
        config: &Configuration,
        draw: impl FnOnce(i32, i32) -> i32,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        // validate() guarantees all three fields are present
        let (Some(minimum), Some(maximum), Some(attempts)) =
            (config.minimum(), config.maximum(), config.attempts())
        else {
            return Err(ConfigurationError::MissingField("configuration").into());
        };

        let secret = checked_draw(minimum, maximum, draw)?;
        Ok(Self {
            minimum,
            maximum,
            attempts,
            remaining_attempts: attempts,
            secret,
            phase: GamePhase::Active,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    #[inline]
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// The configured attempt budget
    #[inline]
    pub fn attempts(&self) -> i32 {
        self.attempts
    }

    #[inline]
    pub fn remaining_attempts(&self) -> i32 {
        self.remaining_attempts
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The hidden number. Hosts should only reveal it once the game is over.
    #[inline]
    pub fn secret(&self) -> i32 {
        self.secret
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Submit a guess.
    ///
    /// Out-of-range guesses and guesses after the game ended are refused
    /// without touching any state. Otherwise one attempt is consumed and the
    /// guess classified; running out of attempts reports `YouLost` even when
    /// the guess would have been too high or too low.
    pub fn attempt(&mut self, guess: i32) -> Result<DrawResult, AttemptError> {
        if self.phase.is_terminal() {
            return Err(AttemptError::GameOver { phase: self.phase });
        }
        if guess < self.minimum || guess > self.maximum {
            return Err(AttemptError::OutOfRange {
                guess,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }

        self.remaining_attempts -= 1;

        let result = if guess == self.secret {
            self.phase = GamePhase::Won;
            DrawResult::YouWon
        } else if self.remaining_attempts == 0 {
            self.phase = GamePhase::Lost;
            DrawResult::YouLost
        } else if guess > self.secret {
            DrawResult::TooHigh
        } else {
            DrawResult::TooLow
        };
        Ok(result)
    }

    /// Draw a new secret and restore the full attempt budget.
    ///
    /// On error the game is left untouched.
    pub fn reset(&mut self, draw: impl FnOnce(i32, i32) -> i32) -> Result<(), DomainError> {
        self.secret = checked_draw(self.minimum, self.maximum, draw)?;
        self.remaining_attempts = self.attempts;
        self.phase = GamePhase::Active;
        Ok(())
    }
}

fn checked_draw(
    minimum: i32,
    maximum: i32,
    draw: impl FnOnce(i32, i32) -> i32,
) -> Result<i32, DomainError> {
    let secret = draw(minimum, maximum);
    if secret < minimum || secret > maximum {
        return Err(DomainError::constraint(format!(
            "drawn secret {secret} is outside [{minimum}, {maximum}]"
        )));
    }
    Ok(secret)
}
