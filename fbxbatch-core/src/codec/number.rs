//! Locale-independent decimal text for keyframe attributes.
//!
//! Formatting uses the shortest representation that parses back to the same
//! `f64`, always with a `.` separator and no grouping, so a value survives an
//! encode/decode cycle bit for bit regardless of the host's locale settings.

/// Formats a keyframe value for a `Begin`, `End` or `FPS` attribute.
pub fn format_decimal(value: f64) -> String {
    value.to_string()
}

/// Parses attribute text written by [`format_decimal`] (or by hand).
///
/// Surrounding ASCII whitespace is ignored. Comma decimals, digit grouping and
/// empty text are rejected.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
