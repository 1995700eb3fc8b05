//! Widget content and layout models

use chrono::{DateTime, Utc};

/// Most recent usable sample of a field
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

/// Text shown on top of the chart, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetContent {
    pub channel_name: String,
    pub field_name: String,
    pub value_text: String,
    pub created_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextWeight {
    Regular,
    Semibold,
}

/// A positioned line of text, in points
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font_size: f64,
    pub weight: TextWeight,
    /// Smallest factor the font may shrink to when the line overflows
    pub min_scale: f64,
    pub top: f64,
}

/// Final widget image plus its tap target
#[derive(Debug, Clone)]
pub struct RenderedWidget {
    pub png: Vec<u8>,
    pub url: String,
    pub width: u32,
    pub height: u32,
}
