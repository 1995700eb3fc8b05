use plotters::style::RGBColor;

/// Parse `#rrggbb` (leading `#` optional) into a plotters color
pub fn parse_hex_color(hex: &str) -> Result<RGBColor, String> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{}' is not a #rrggbb color", hex));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| format!("'{}' is not a #rrggbb color: {}", hex, e))
    };

    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
