//! Observer ports between the controller and its views.
//!
//! Two small traits instead of one listener hierarchy:
//! - `DrawNumberView` - notifications flowing from the game to a view
//! - `DrawNumberViewObserver` - commands flowing from a view to the game
//!
//! Neither side owns the other. The controller keeps the views it was given
//! in registration order; each view keeps a `Weak` handle back.

use std::sync::Weak;

use drawnumber_domain::DrawResult;

/// What the host should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Keep accepting commands
    Running,
    /// The controller quit; the host should shut down
    Quit,
}

impl Lifecycle {
    pub fn is_quit(&self) -> bool {
        matches!(self, Lifecycle::Quit)
    }
}

/// Notification receiver. Any number may be registered with the controller.
#[cfg_attr(test, mockall::automock)]
pub trait DrawNumberView: Send + Sync {
    /// Bind the command channel back to the controller.
    fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>);

    /// Called once per view while the controller is being wired.
    fn start(&self);

    /// Classification of a valid attempt.
    fn result(&self, result: DrawResult);

    /// The last guess was refused (out of range or the game is over).
    fn number_incorrect(&self);

    /// A fatal error, shown before the application quits.
    fn display_error(&self, message: &str);
}

/// Command receiver. Implemented by the controller, invoked by views.
#[cfg_attr(test, mockall::automock)]
pub trait DrawNumberViewObserver: Send + Sync {
    fn new_attempt(&self, n: i32) -> Lifecycle;

    fn reset_game(&self) -> Lifecycle;

    /// Stop processing commands. Every later command is ignored.
    fn quit(&self) -> Lifecycle;
}
