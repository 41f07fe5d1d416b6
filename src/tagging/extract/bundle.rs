use crate::domain::model::{Dimension, Tag};
use regex::Regex;
use std::sync::LazyLock;

/// Counts above this are sold as bulk cases.
const BULK_THRESHOLD: u64 = 50;
/// Counts above this (up to `BULK_THRESHOLD`) are display boxes.
const DISPLAY_THRESHOLD: u64 = 24;

enum BundleRule {
    Count(Regex),
    Fixed(Regex, &'static str),
}

static BUNDLE_RULES: LazyLock<Vec<BundleRule>> = LazyLock::new(|| {
    vec![
        BundleRule::Count(Regex::new(r"(\d+)\s*(?:-\s*)?pack\b").unwrap()),
        BundleRule::Count(Regex::new(r"(\d+)\s*(?:pk|pc|pcs|pieces?|count|ct)\b").unwrap()),
        BundleRule::Fixed(Regex::new(r"\bdisplay\s*(?:box|case)?\b").unwrap(), "display-box"),
        BundleRule::Fixed(Regex::new(r"\bcarton\b").unwrap(), "display-box"),
        BundleRule::Fixed(Regex::new(r"\bbulk\s*(?:case|box)?\b").unwrap(), "bulk-case"),
    ]
});

fn tier_count(digits: &str) -> String {
    // digits too long for u64 are certainly bulk
    let count = digits.parse::<u64>().unwrap_or(u64::MAX);
    if count > BULK_THRESHOLD {
        "bulk-case".to_string()
    } else if count > DISPLAY_THRESHOLD {
        "display-box".to_string()
    } else {
        format!("{}-pack", digits)
    }
}

/// Pack size from the title, at most one tag.
pub fn extract_bundle(title: &str) -> Option<Tag> {
    let title = title.to_lowercase();
    BUNDLE_RULES.iter().find_map(|rule| {
        let value = match rule {
            BundleRule::Count(re) => tier_count(&re.captures(&title)?[1]),
            BundleRule::Fixed(re, value) => {
                if !re.is_match(&title) {
                    return None;
                }
                value.to_string()
            }
        };
        Some(Tag::new(Dimension::Bundle, value))
    })
}
