use crate::domain::model::{Dimension, Tag};
use regex::Regex;
use std::sync::LazyLock;

/// Tried in order against the title as written (case-sensitive).
static LENGTH_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r#"(\d+(?:\.\d+)?)\s*(?:inch|inches|in|")"#).unwrap(),
        Regex::new(r"(\d+(?:\.\d+)?)[″']").unwrap(),
        Regex::new(r#"^(\d+)\s*(?:inch|in|"|″)"#).unwrap(),
        Regex::new(r"(\d+)\s*(?:INCH|inch|In|IN)\b").unwrap(),
    ]
});

/// Whole numbers drop their decimals ("8.0" → "8"); anything else keeps
/// the digits as written.
fn render_length(digits: &str) -> String {
    match digits.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value < u64::MAX as f64 => {
            format!("{}", value as u64)
        }
        _ => digits.to_string(),
    }
}

pub fn extract_length(title: &str) -> Option<Tag> {
    LENGTH_PATTERNS
        .iter()
        .find_map(|re| re.captures(title))
        .map(|caps| Tag::new(Dimension::Length, format!("{}in", render_length(&caps[1]))))
}
