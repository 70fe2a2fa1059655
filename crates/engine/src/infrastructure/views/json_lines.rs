//! Event log view - one JSON object per notification.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError, Weak};

use drawnumber_domain::DrawResult;
use serde::Serialize;

use crate::infrastructure::ports::{DrawNumberView, DrawNumberViewObserver};

/// Wire shape of a logged notification.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum ViewEvent<'a> {
    Started,
    Result { result: DrawResult },
    NumberIncorrect,
    Error { message: &'a str },
}

/// Appends every notification to a writer as JSON Lines.
///
/// ```text
/// {"event":"started"}
/// {"event":"result","result":"TOO_HIGH"}
/// {"event":"number_incorrect"}
/// ```
pub struct JsonLinesView<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn record(&self, event: ViewEvent<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = write_event(&mut *out, &event) {
            tracing::warn!(error = %e, ?event, "Failed to append view event");
        }
    }
}

fn write_event(out: &mut impl Write, event: &ViewEvent<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    out.flush()
}

impl<W: Write + Send> DrawNumberView for JsonLinesView<W> {
    fn set_observer(&self, _observer: Weak<dyn DrawNumberViewObserver>) {}

    fn start(&self) {
        self.record(ViewEvent::Started);
    }

    fn result(&self, result: DrawResult) {
        self.record(ViewEvent::Result { result });
    }

    fn number_incorrect(&self) {
        self.record(ViewEvent::NumberIncorrect);
    }

    fn display_error(&self, message: &str) {
        self.record(ViewEvent::Error { message });
    }
}
