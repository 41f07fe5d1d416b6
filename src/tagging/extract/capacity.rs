use crate::domain::model::{Dimension, Tag};
use regex::Regex;
use std::sync::LazyLock;

static ML_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*ml\b").unwrap());
static OZ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*oz\b").unwrap());

/// Jar/packaging capacity from the title. Milliliters win over ounces.
pub fn extract_capacity(title: &str) -> Option<Tag> {
    let title = title.to_lowercase();
    [(&*ML_RE, "ml"), (&*OZ_RE, "oz")]
        .into_iter()
        .find_map(|(re, unit)| {
            re.captures(&title)
                .map(|caps| Tag::new(Dimension::Capacity, format!("{}{}", &caps[1], unit)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliliters() {
        assert_eq!(extract_capacity("Glass Jar 5ml").unwrap(), "capacity:5ml");
        assert_eq!(extract_capacity("Child Resistant Jar 60 ML").unwrap(), "capacity:60ml");
    }

    #[test]
    fn test_ounces() {
        assert_eq!(extract_capacity("Stash Jar 2oz").unwrap(), "capacity:2oz");
    }

    #[test]
    fn test_ml_before_oz() {
        assert_eq!(extract_capacity("Jar 1oz / 30ml").unwrap(), "capacity:30ml");
    }

    #[test]
    fn test_unit_must_end_word() {
        assert!(extract_capacity("10 mlk").is_none());
        assert!(extract_capacity("").is_none());
    }
}
