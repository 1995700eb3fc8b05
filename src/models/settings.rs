//! Widget and chart settings

use std::fmt;
use std::str::FromStr;

/// Which channel/field to show, parsed from the widget parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    pub channel_id: String,
    pub field_id: String,
    pub query_params: Option<String>,
    pub read_key: Option<String>,
    /// Show the "At hh:mm:ss" line under the value
    pub show_created: bool,
}

impl WidgetSettings {
    /// Page opened when the widget is tapped
    pub fn channel_url(&self) -> String {
        format!("https://thingspeak.com/channels/{}", self.channel_id)
    }
}

/// Fill styling for the background area chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub color: String,
    pub opacity: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            color: "#8cf5f3".to_string(),
            opacity: 0.6,
        }
    }
}

/// Widget family; decides canvas size and point scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl WidgetSize {
    /// Pixel size of the rendered chart/canvas
    pub fn chart_dimensions(&self) -> (u32, u32) {
        match self {
            WidgetSize::Small | WidgetSize::Large => (1200, 1200),
            WidgetSize::Medium => (1200, 600),
        }
    }

    /// Size of the widget on the home screen, in points
    pub fn point_dimensions(&self) -> (f64, f64) {
        match self {
            WidgetSize::Small => (155.0, 155.0),
            WidgetSize::Medium => (329.0, 155.0),
            WidgetSize::Large => (329.0, 345.0),
        }
    }

    /// Pixels per point
    pub fn scale(&self) -> f64 {
        let (px, _) = self.chart_dimensions();
        let (pt, _) = self.point_dimensions();
        px as f64 / pt
    }
}

impl FromStr for WidgetSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(WidgetSize::Small),
            "medium" => Ok(WidgetSize::Medium),
            "large" => Ok(WidgetSize::Large),
            other => Err(format!("unknown widget size '{}', expected small, medium or large", other)),
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
        };
        f.write_str(name)
    }
}
