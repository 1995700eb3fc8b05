//! Runtime configuration, read from the environment (and `.env`)

use std::path::PathBuf;

use crate::api::thingspeak::ThingSpeakClient;
use crate::models::{ChartSettings, WidgetSettings, WidgetSize};
use crate::services::config_service::{parse_widget_parameter, DEFAULT_WIDGET_PARAMETER};
use crate::utils::{parse_hex_color, ConfigError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub widget: WidgetSettings,
    pub chart: ChartSettings,
    pub size: WidgetSize,
    pub output: PathBuf,
    pub base_url: String,
}

impl AppConfig {
    /// Build the config from the process environment
    ///
    /// A widget parameter given on the command line wins over `WIDGET_PARAMETER`.
    pub fn from_env(cli_parameter: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(cli_parameter, |name| std::env::var(name).ok())
    }

    fn from_lookup<F>(cli_parameter: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let show_created = match get("WIDGET_SHOW_CREATED") {
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::InvalidEnv {
                name: "WIDGET_SHOW_CREATED",
                reason: format!("'{}' is not a boolean", v),
            })?,
            None => true,
        };

        let parameter = cli_parameter
            .or_else(|| get("WIDGET_PARAMETER"))
            .unwrap_or_else(|| DEFAULT_WIDGET_PARAMETER.to_string());
        let widget = parse_widget_parameter(&parameter, show_created)?;

        let size = match get("WIDGET_SIZE") {
            Some(v) => v
                .parse::<WidgetSize>()
                .map_err(|reason| ConfigError::InvalidEnv { name: "WIDGET_SIZE", reason })?,
            None => WidgetSize::default(),
        };

        let mut chart = ChartSettings::default();
        if let Some(color) = get("CHART_COLOR") {
            parse_hex_color(&color)
                .map_err(|reason| ConfigError::InvalidEnv { name: "CHART_COLOR", reason })?;
            chart.color = color;
        }
        if let Some(opacity) = get("CHART_OPACITY") {
            chart.opacity = opacity
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|o| (0.0..=1.0).contains(o))
                .ok_or_else(|| ConfigError::InvalidEnv {
                    name: "CHART_OPACITY",
                    reason: format!("'{}' is not a number between 0 and 1", opacity),
                })?;
        }

        Ok(Self {
            widget,
            chart,
            size,
            output: get("WIDGET_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("widget.png")),
            base_url: get("THINGSPEAK_BASE_URL")
                .unwrap_or_else(|| ThingSpeakClient::DEFAULT_BASE_URL.to_string()),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
