//! Draw Number Engine library.
//!
//! This crate contains the controller and every adapter of the game.
//!
//! ## Structure
//!
//! - `use_cases/` - Configuration loading
//! - `infrastructure/` - Port traits plus their implementations (config sources, views, random)
//! - `app` - The controller that wires views to the game

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared helpers for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::{DrawNumberApp, StartupError};
