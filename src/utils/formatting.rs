//! Formatting utilities used for CLI outputs.

use unicode_width::UnicodeWidthStr;

/// Left-align `s` in `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Cut `s` to at most `width` columns, marking the cut with `…`.
pub fn truncate(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        let candidate = format!("{out}{ch}");
        if UnicodeWidthStr::width(candidate.as_str()) + 1 > width {
            break;
        }
        out = candidate;
    }
    out.push('…');
    out
}

/// `[██████░░░░]` for a percentage in 0..=100.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let pct = percent.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(width.saturating_sub(filled))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(50.0, 10), "[█████░░░░░]");
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(progress_bar(250.0, 4), "[████]");
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long goal title", 8), "a very …");
        assert_eq!(pad_right("ab", 4), "ab  ");
    }
}
