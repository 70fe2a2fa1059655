//! Testability ports for injecting randomness.

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform draw from the inclusive range `[min, max]`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
