//! Data models for the widget pipeline
//!
//! Settings parsed from the environment, chart geometry produced by the
//! path generator, and the text content laid over the chart.

pub mod chart;
pub mod settings;
pub mod widget;

// Re-export commonly used types for convenience
pub use chart::{PathCommand, Point, SmoothPath};
pub use settings::{ChartSettings, WidgetSettings, WidgetSize};
pub use widget::{Reading, RenderedWidget, TextLine, TextWeight, WidgetContent};
