//! Aggregates - entities that own mutable game state

mod draw_number;

pub use draw_number::{AttemptError, DrawNumber, GamePhase};
