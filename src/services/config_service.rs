use tracing::warn;

use crate::models::WidgetSettings;
use crate::utils::ConfigError;

/// Parameter used when the widget has not been given one
pub const DEFAULT_WIDGET_PARAMETER: &str = "2738067|1|results=50|6VBXCSIF3MUSAHMB";

/// Parse `channelId|fieldId|queryParams|readKey` into widget settings
///
/// Channel and field are required; query and key may be left out or empty.
pub fn parse_widget_parameter(raw: &str, show_created: bool) -> Result<WidgetSettings, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Empty);
    }

    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    if parts.len() > 4 {
        warn!("Widget parameter has {} segments, ignoring everything after the fourth", parts.len());
    }

    let required = |idx: usize, name: &'static str| {
        parts
            .get(idx)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .ok_or(ConfigError::MissingSegment(name))
    };
    let optional = |idx: usize| {
        parts
            .get(idx)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    };

    Ok(WidgetSettings {
        channel_id: required(0, "channel id")?,
        field_id: required(1, "field id")?,
        query_params: optional(2),
        read_key: optional(3),
        show_created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_parameter() {
        let settings = parse_widget_parameter("123|4|results=10|ABCDEF", true).unwrap();
        assert_eq!(settings.channel_id, "123");
        assert_eq!(settings.field_id, "4");
        assert_eq!(settings.query_params.as_deref(), Some("results=10"));
        assert_eq!(settings.read_key.as_deref(), Some("ABCDEF"));
        assert!(settings.show_created);
    }

    #[test]
    fn test_read_key_is_optional() {
        let settings = parse_widget_parameter("123|4|results=10", false).unwrap();
        assert_eq!(settings.read_key, None);

        let settings = parse_widget_parameter("123|4||", false).unwrap();
        assert_eq!(settings.query_params, None);
        assert_eq!(settings.read_key, None);
    }

    #[test]
    fn test_missing_required_segments() {
        assert_eq!(parse_widget_parameter("", true), Err(ConfigError::Empty));
        assert_eq!(parse_widget_parameter("   ", true), Err(ConfigError::Empty));
        assert_eq!(
            parse_widget_parameter("123", true),
            Err(ConfigError::MissingSegment("field id"))
        );
        assert_eq!(
            parse_widget_parameter("|4|results=10", true),
            Err(ConfigError::MissingSegment("channel id"))
        );
    }

    #[test]
    fn test_extra_segments_ignored() {
        let settings = parse_widget_parameter("1|2|results=5|KEY|junk", true).unwrap();
        assert_eq!(settings.read_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn test_default_parameter_parses() {
        let settings = parse_widget_parameter(DEFAULT_WIDGET_PARAMETER, true).unwrap();
        assert_eq!(settings.channel_id, "2738067");
        assert_eq!(settings.field_id, "1");
    }
}
