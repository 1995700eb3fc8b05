use serde_json::Value;

use crate::api::thingspeak::Feed;
use crate::models::Reading;

/// Parse one feed value; anything unusable becomes NaN
fn parse_sample(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Map feeds, in order, to the numeric value of `field{field_id}`
///
/// Missing, null or unparseable entries keep their slot as NaN.
pub fn extract_series(feeds: &[Feed], field_id: &str) -> Vec<f64> {
    feeds
        .iter()
        .map(|feed| parse_sample(feed.field(field_id)))
        .collect()
}

/// Drop NaN/infinite samples, keeping order
pub fn finite_samples(series: &[f64]) -> Vec<f64> {
    series.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Most recent feed with a finite value for the field
pub fn latest_reading(feeds: &[Feed], field_id: &str) -> Option<Reading> {
    feeds.iter().rev().find_map(|feed| {
        let value = parse_sample(feed.field(field_id));
        value.is_finite().then(|| Reading {
            value,
            created_at: feed.created_at,
        })
    })
}
