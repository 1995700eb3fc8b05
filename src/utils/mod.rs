pub mod color;
pub mod errors;
pub mod format;

pub use color::parse_hex_color;
pub use errors::{ConfigError, SeriesError, WidgetError};
pub use format::{format_created, format_value};
