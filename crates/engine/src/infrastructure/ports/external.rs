//! External storage port traits.

use std::io::BufRead;

use super::error::ConfigSourceError;

// =============================================================================
// Configuration Source
// =============================================================================

/// Where the `key: value` game configuration lives.
///
/// The port only hands out a line reader; parsing belongs to the
/// `LoadConfiguration` use case.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSourcePort: Send + Sync {
    /// Human-readable name for logs and error messages (e.g. a file path).
    fn describe(&self) -> String;

    /// Open the source for reading.
    fn open(&self) -> Result<Box<dyn BufRead + Send>, ConfigSourceError>;
}
