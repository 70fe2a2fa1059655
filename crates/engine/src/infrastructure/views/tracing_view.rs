//! Log view - every notification becomes a structured tracing event.

use std::sync::Weak;

use drawnumber_domain::DrawResult;

use crate::infrastructure::ports::{DrawNumberView, DrawNumberViewObserver};

/// Notification-only view backed by `tracing`.
///
/// It never issues commands, so the observer handle is dropped.
#[derive(Debug, Default)]
pub struct TracingView;

impl TracingView {
    pub fn new() -> Self {
        Self
    }
}

impl DrawNumberView for TracingView {
    fn set_observer(&self, _observer: Weak<dyn DrawNumberViewObserver>) {}

    fn start(&self) {
        tracing::info!(target: "drawnumber::view", "View started");
    }

    fn result(&self, result: DrawResult) {
        tracing::info!(
            target: "drawnumber::view",
            ?result,
            terminal = result.is_terminal(),
            "{}",
            result.description()
        );
    }

    fn number_incorrect(&self) {
        tracing::warn!(target: "drawnumber::view", "Incorrect number");
    }

    fn display_error(&self, message: &str) {
        tracing::error!(target: "drawnumber::view", %message, "Fatal error");
    }
}
