//! ANSI color helper utilities for terminal output.
use ansi_term::Colour;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// `#RRGGBB` → (r, g, b)
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

pub fn is_valid_hex(color: &str) -> bool {
    parse_hex(color).is_some()
}

/// Convert a stored float list such as `[0.4667, 0.8667, 0.4667, 1]`
/// into `#77DD77`. The alpha channel is dropped.
pub fn legacy_rgba_to_hex(raw: &str) -> Option<String> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    let parts: Vec<f64> = inner
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;

    if parts.len() < 3 {
        return None;
    }

    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(format!(
        "#{:02X}{:02X}{:02X}",
        channel(parts[0]),
        channel(parts[1]),
        channel(parts[2])
    ))
}

/// Paint `text` with the goal's color, falling back to plain text.
pub fn paint_hex(color: &str, text: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => Colour::RGB(r, g, b).paint(text).to_string(),
        None => text.to_string(),
    }
}

/// Percent color: done → green, half way → yellow, otherwise grey.
pub fn color_for_percent(percent: f64) -> &'static str {
    if percent >= 100.0 {
        GREEN
    } else if percent >= 50.0 {
        YELLOW
    } else {
        GREY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_float_list_converts_to_hex() {
        assert_eq!(
            legacy_rgba_to_hex("[0.4667, 0.8667, 0.4667, 1]").as_deref(),
            Some("#77DD77")
        );
        assert_eq!(legacy_rgba_to_hex("#77DD77"), None);
        assert_eq!(legacy_rgba_to_hex("[1, x, 0]"), None);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#3498db"), Some((0x34, 0x98, 0xdb)));
        assert!(!is_valid_hex("3498db"));
        assert!(!is_valid_hex("#34"));
    }
}
