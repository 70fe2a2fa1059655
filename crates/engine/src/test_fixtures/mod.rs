//! Common test helpers for views and writers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{NotificationLog, RecordingView};
//!
//! let log = NotificationLog::default();
//! let first = Arc::new(RecordingView::new("first", log.clone()));
//! // ... register views, drive the controller
//! assert_eq!(log.entries()[0].0, "first");
//! ```

use std::io::{self, Write};
use std::sync::{Arc, Mutex, Weak};

use drawnumber_domain::DrawResult;

use crate::infrastructure::ports::{DrawNumberView, DrawNumberViewObserver};

// =============================================================================
// Writers
// =============================================================================

/// In-memory writer whose contents stay readable after it is moved into a view.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Views
// =============================================================================

/// A notification as seen by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Start,
    Result(DrawResult),
    NumberIncorrect,
    Error(String),
}

/// Ordered log shared by several recording views.
#[derive(Clone, Default)]
pub struct NotificationLog(Arc<Mutex<Vec<(&'static str, Notification)>>>);

impl NotificationLog {
    pub fn entries(&self) -> Vec<(&'static str, Notification)> {
        self.0.lock().unwrap().clone()
    }

    /// Notifications received by one view, in order.
    pub fn for_view(&self, name: &str) -> Vec<Notification> {
        self.entries()
            .into_iter()
            .filter(|(view, _)| *view == name)
            .map(|(_, notification)| notification)
            .collect()
    }

    fn push(&self, name: &'static str, notification: Notification) {
        self.0.lock().unwrap().push((name, notification));
    }
}

/// View that records every notification and keeps its observer handle.
pub struct RecordingView {
    name: &'static str,
    log: NotificationLog,
    observer: Mutex<Option<Weak<dyn DrawNumberViewObserver>>>,
}

impl RecordingView {
    pub fn new(name: &'static str, log: NotificationLog) -> Self {
        Self {
            name,
            log,
            observer: Mutex::new(None),
        }
    }

    /// The bound controller, if it is still alive.
    pub fn observer(&self) -> Option<Arc<dyn DrawNumberViewObserver>> {
        self.observer.lock().unwrap().as_ref().and_then(Weak::upgrade)
    }
}

impl DrawNumberView for RecordingView {
    fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>) {
        *self.observer.lock().unwrap() = Some(observer);
    }

    fn start(&self) {
        self.log.push(self.name, Notification::Start);
    }

    fn result(&self, result: DrawResult) {
        self.log.push(self.name, Notification::Result(result));
    }

    fn number_incorrect(&self) {
        self.log.push(self.name, Notification::NumberIncorrect);
    }

    fn display_error(&self, message: &str) {
        self.log
            .push(self.name, Notification::Error(message.to_string()));
    }
}
