//! View adapters - concrete `DrawNumberView` implementations.

mod console;
mod json_lines;
mod tracing_view;

pub use console::ConsoleView;
pub use json_lines::JsonLinesView;
pub use tracing_view::TracingView;
