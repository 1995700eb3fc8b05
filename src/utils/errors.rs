use thiserror::Error;

use crate::api::thingspeak::ApiError;

/// Widget parameter or environment problems
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Widget parameter is empty. Eg: 2738067|1|results=50|6VBXCSIF3MUSAHMB")]
    Empty,
    #[error("Widget parameter is missing the {0}. Eg: 2738067|1|results=50|6VBXCSIF3MUSAHMB")]
    MissingSegment(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
}

/// Numeric input the path generator cannot turn into geometry
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("Not enough data to draw a chart ({0} samples, minimum 2 required)")]
    TooFewSamples(usize),
    #[error("None of the {feeds} feeds has a numeric value for this field")]
    NoNumericSamples { feeds: usize },
    #[error("Sample {index} is not a finite number")]
    NonFinite { index: usize },
    #[error("Chart bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: f64, height: f64 },
}

/// Top-level failure of one widget run
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Fetch error: {0}")]
    Fetch(#[from] ApiError),
    #[error("Degenerate series: {0}")]
    DegenerateSeries(#[from] SeriesError),
    #[error("Render error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes_stay_distinct() {
        let err: WidgetError = ConfigError::MissingSegment("field id").into();
        assert!(matches!(err, WidgetError::Config(_)));

        let err: WidgetError = ApiError::NotFound("channel".to_string()).into();
        assert_eq!(err.to_string(), "Fetch error: Not Found: channel");

        let err: WidgetError = SeriesError::TooFewSamples(1).into();
        assert!(matches!(err, WidgetError::DegenerateSeries(SeriesError::TooFewSamples(1))));
    }
}
