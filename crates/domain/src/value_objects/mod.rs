//! Value objects - immutable values with no identity

mod configuration;
mod draw_result;

pub use configuration::{Configuration, ConfigurationBuilder, ConfigurationError};
pub use draw_result::DrawResult;
