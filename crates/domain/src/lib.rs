//! Draw Number domain.
//!
//! Pure types and rules for the guess-the-number game:
//!
//! - `value_objects/` - immutable values (configuration, draw results)
//! - `aggregates/` - the `DrawNumber` game state machine
//! - `error` - unified domain error
//!
//! Nothing in this crate performs I/O or owns a random number generator.
//! Randomness is injected by the caller as a closure.

pub mod aggregates;
pub mod error;
pub mod value_objects;

pub use aggregates::{AttemptError, DrawNumber, GamePhase};
pub use error::DomainError;
pub use value_objects::{Configuration, ConfigurationBuilder, ConfigurationError, DrawResult};
