use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a reading the way the widget shows it: grouped thousands,
/// at most two fraction digits, no trailing zeros.
///
/// `1234.5` -> `"1,234.5"`, `22.456` -> `"22.46"`, `3.0` -> `"3"`
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `h:mm:ss AM` in the given timezone
pub fn format_time_in<Tz: TimeZone>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    created_at.with_timezone(tz).format("%-I:%M:%S %p").to_string()
}

/// The "At ..." line under the value, in local time
pub fn format_created(created_at: &DateTime<Utc>) -> String {
    format!("At {}", format_time_in(created_at, &Local))
}
