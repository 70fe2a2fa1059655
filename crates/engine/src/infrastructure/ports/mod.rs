//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Configuration storage (could swap a file -> embedded resource -> network)
//! - Views (terminal, event log, tracing - any number at once)
//! - The command channel views use to drive the game
//! - Random (for testing)

mod error;
mod external;
mod testing;
mod views;

// =============================================================================
// Error Types
// =============================================================================
pub use error::ConfigSourceError;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::ConfigSourcePort;

// =============================================================================
// Observer Ports
// =============================================================================
pub use views::{DrawNumberView, DrawNumberViewObserver, Lifecycle};

// =============================================================================
// Testability Ports
// =============================================================================
pub use testing::RandomPort;

#[cfg(test)]
pub use external::MockConfigSourcePort;
#[cfg(test)]
pub use testing::MockRandomPort;
#[cfg(test)]
pub use views::{MockDrawNumberView, MockDrawNumberViewObserver};
