//! Terminal view - prints notifications and reads player commands.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use drawnumber_domain::DrawResult;

use crate::infrastructure::ports::{DrawNumberView, DrawNumberViewObserver, Lifecycle};

const HELP: &str = "Enter a number, 'reset' to start over or 'quit' to exit";

/// A line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleCommand {
    Guess(i32),
    Reset,
    Quit,
}

impl std::str::FromStr for ConsoleCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" | "r" => Ok(ConsoleCommand::Reset),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            other => other.parse().map(ConsoleCommand::Guess).map_err(|_| ()),
        }
    }
}

/// Renders notifications as text lines and doubles as the command source.
///
/// Output failures are logged, never propagated: a broken terminal must not
/// stop the other registered views from being notified.
pub struct ConsoleView<W> {
    out: Mutex<W>,
    observer: Mutex<Option<Weak<dyn DrawNumberViewObserver>>>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            observer: Mutex::new(None),
        }
    }

    /// Read commands line by line until the controller quits.
    ///
    /// End of input quits the controller, like closing a window would. So
    /// does a read failure, which is then returned. Bytes that are not UTF-8
    /// are just unrecognized input. Returns `Lifecycle::Quit` immediately if
    /// the view was never bound or the controller is gone.
    pub fn run(&self, mut input: impl BufRead) -> io::Result<Lifecycle> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read console input, quitting");
                    self.quit_controller();
                    return Err(e);
                }
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(observer) = self.observer() else {
                tracing::warn!("Console view has no controller, stopping");
                return Ok(Lifecycle::Quit);
            };

            let lifecycle = match line.parse::<ConsoleCommand>() {
                Ok(ConsoleCommand::Guess(n)) => observer.new_attempt(n),
                Ok(ConsoleCommand::Reset) => {
                    let lifecycle = observer.reset_game();
                    if !lifecycle.is_quit() {
                        self.print("New game started");
                    }
                    lifecycle
                }
                Ok(ConsoleCommand::Quit) => observer.quit(),
                Err(()) => {
                    tracing::debug!(input = %line, "Unrecognized console input");
                    self.print(HELP);
                    Lifecycle::Running
                }
            };

            if lifecycle.is_quit() {
                return Ok(Lifecycle::Quit);
            }
        }

        tracing::debug!("Console input closed");
        Ok(self.quit_controller())
    }

    fn quit_controller(&self) -> Lifecycle {
        self.observer()
            .map(|observer| observer.quit())
            .unwrap_or(Lifecycle::Quit)
    }

    fn observer(&self) -> Option<Arc<dyn DrawNumberViewObserver>> {
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }

    fn print(&self, message: impl fmt::Display) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{message}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to console");
        }
    }
}

impl<W: Write + Send> DrawNumberView for ConsoleView<W> {
    fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>) {
        *self.observer.lock().unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    fn start(&self) {
        self.print(format_args!("Guess the number! {HELP}."));
    }

    fn result(&self, result: DrawResult) {
        self.print(result);
        if result.is_terminal() {
            self.print("Type 'reset' to play again or 'quit' to exit");
        }
    }

    fn number_incorrect(&self) {
        self.print("Incorrect number... try again");
    }

    fn display_error(&self, message: &str) {
        self.print(format_args!("Error: {message}"));
    }
}
