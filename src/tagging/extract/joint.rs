use crate::domain::model::{Dimension, Tag};
use regex::Regex;
use std::sync::LazyLock;

/// Joint sizes in precedence order. 19mm is sold as 18mm.
static SIZE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"\b10\s*mm\b").unwrap(), "10mm"),
        (Regex::new(r"\b14\s*mm\b").unwrap(), "14mm"),
        (Regex::new(r"\b18\s*mm\b").unwrap(), "18mm"),
        (Regex::new(r"\b19\s*mm\b").unwrap(), "18mm"),
    ]
});

/// "14 MALE", "18F" style shorthand in titles.
static TITLE_SIZE_GENDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(10|14|18|19)\s*(male|female|m|f)\b").unwrap());

static ANGLE_45_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b45\s*(degree|°|deg)?\b").unwrap());
static ANGLE_90_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b90\s*(degree|°|deg)?\b").unwrap());

static FEMALE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bfemale\b").unwrap());
static MALE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmale\b").unwrap());
static SUFFIX_F_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\s*f\b").unwrap());
static SUFFIX_M_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\s*m\b").unwrap());

fn joint_size(combined: &str, title: &str) -> Option<&'static str> {
    if let Some((_, size)) = SIZE_PATTERNS.iter().find(|(re, _)| re.is_match(combined)) {
        return Some(size);
    }

    let caps = TITLE_SIZE_GENDER_RE.captures(title)?;
    Some(match &caps[1] {
        "10" => "10mm",
        "14" => "14mm",
        _ => "18mm",
    })
}

fn joint_angle(combined: &str) -> Option<&'static str> {
    if ANGLE_45_RE.is_match(combined) || combined.contains("45°") {
        Some("45")
    } else if ANGLE_90_RE.is_match(combined) || combined.contains("90°") {
        Some("90")
    } else {
        None
    }
}

fn joint_gender(combined: &str, title: &str) -> Option<&'static str> {
    if FEMALE_RE.is_match(combined) {
        Some("female")
    } else if MALE_RE.is_match(combined) {
        Some("male")
    } else if SUFFIX_F_RE.is_match(title) {
        Some("female")
    } else if SUFFIX_M_RE.is_match(title) {
        Some("male")
    } else {
        None
    }
}

/// Joint size, angle and gender from title and body. Each facet is
/// independent and contributes at most one tag, in that order.
pub fn extract_joint_details(title: &str, body: &str) -> Vec<Tag> {
    let title = title.to_lowercase();
    let combined = format!("{} {}", title, body.to_lowercase());

    let mut tags = Vec::with_capacity(3);
    if let Some(size) = joint_size(&combined, &title) {
        tags.push(Tag::new(Dimension::JointSize, size));
    }
    if let Some(angle) = joint_angle(&combined) {
        tags.push(Tag::new(Dimension::JointAngle, angle));
    }
    if let Some(gender) = joint_gender(&combined, &title) {
        tags.push(Tag::new(Dimension::JointGender, gender));
    }
    tags
}
