use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single valid attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawResult {
    YouWon,
    YouLost,
    TooLow,
    TooHigh,
}

impl DrawResult {
    /// Player-facing description of the result
    pub fn description(&self) -> &'static str {
        match self {
            DrawResult::YouWon => "You won!",
            DrawResult::YouLost => "You lost",
            DrawResult::TooLow => "Your guess is too low",
            DrawResult::TooHigh => "Your guess is too high",
        }
    }

    /// Whether this result ends the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, DrawResult::YouWon | DrawResult::YouLost)
    }
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
