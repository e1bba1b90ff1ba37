//! Display formatting helpers

use std::fmt::Display;

/// Left-pads `value` with `fill` until it is `width` characters long.
///
/// Values already at least `width` characters long are returned unchanged.
///
/// ```
/// use angelica_lib::format::pad_start;
///
/// assert_eq!(pad_start(7, 2, '0'), "07");
/// assert_eq!(pad_start("abc", 2, '0'), "abc");
/// ```
pub fn pad_start(value: impl Display, width: usize, fill: char) -> String {
    let text = value.to_string();
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let mut padded: String = std::iter::repeat_n(fill, width - len).collect();
    padded.push_str(&text);
    padded
}

/// Formats a duration in whole seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, and grow past two digits when needed.
///
/// ```
/// use angelica_lib::format::format_time;
///
/// assert_eq!(format_time(3_725), "01:02:05");
/// ```
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds / 60 % 60;
    let secs = seconds % 60;
    format!(
        "{}:{}:{}",
        pad_start(hours, 2, '0'),
        pad_start(minutes, 2, '0'),
        pad_start(secs, 2, '0')
    )
}

/// Formats a textual number of seconds as `HH:MM:SS`.
///
/// Fractions are truncated and negative numbers count as zero. `Infinity`
/// (optionally signed) has no whole-second reading and also formats as
/// `00:00:00`, as does empty text. Any other text that is not a number,
/// including `inf` and `NaN`, is returned as-is.
pub fn format_time_str(seconds: &str) -> String {
    let trimmed = seconds.trim();
    if trimmed.is_empty() || is_infinity_literal(trimmed) {
        return format_time(0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => format_time(value.max(0.0) as u64),
        _ => seconds.to_string(),
    }
}

/// `f64` parsing also accepts `inf` and any casing; only the spelled-out
/// literal counts here.
fn is_infinity_literal(text: &str) -> bool {
    text.strip_prefix(['+', '-']).unwrap_or(text) == "Infinity"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_start() {
        assert_eq!(pad_start(5, 2, '0'), "05");
        assert_eq!(pad_start(12, 2, '0'), "12");
        assert_eq!(pad_start("x", 4, '-'), "---x");
        assert_eq!(pad_start("", 0, '0'), "");
        assert_eq!(pad_start("ü", 3, ' '), "  ü");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(60), "00:01:00");
        assert_eq!(format_time(86_399), "23:59:59");
        assert_eq!(format_time(360_000), "100:00:00");
    }

    #[test]
    fn test_format_time_str() {
        assert_eq!(format_time_str("3661"), "01:01:01");
        assert_eq!(format_time_str("61.9"), "00:01:01");
        assert_eq!(format_time_str(" 5 "), "00:00:05");
        assert_eq!(format_time_str("-10"), "00:00:00");
        assert_eq!(format_time_str(""), "00:00:00");
        assert_eq!(format_time_str("n/a"), "n/a");
        assert_eq!(format_time_str("inf"), "inf");
        assert_eq!(format_time_str("NaN"), "NaN");
    }

    #[test]
    fn test_format_time_str_infinity() {
        assert_eq!(format_time_str("Infinity"), "00:00:00");
        assert_eq!(format_time_str("-Infinity"), "00:00:00");
        assert_eq!(format_time_str(" +Infinity "), "00:00:00");
        assert_eq!(format_time_str("infinity"), "infinity");
    }
}
