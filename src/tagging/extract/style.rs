use crate::domain::model::{Dimension, Tag};
use regex::Regex;
use std::sync::LazyLock;

static MADE_IN_USA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"made\s+in\s+(?:the\s+)?usa").unwrap());

/// Glassblowing towns that show up in "made in ..." lines.
static MADE_IN_CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:made|crafted|built)\s+in\s+(?:spokane|eugene|portland|los angeles|san diego|denver)")
        .unwrap()
});

static HEADY_CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"category[:\s]+.*heady").unwrap());

const ANIMAL_TERMS: &[&str] = &[
    "dragon", "shark", "owl", "turtle", "bird", "frog", "cat", "dog", "snake", "octopus", "fish",
    "skull", "monster", "animal", "dino", "dinosaur",
];

/// Place markers that make a "hand-crafted in ..." line count as domestic.
const HAND_CRAFTED_MARKERS: &[&str] = &["usa", ", wa", ", or", ", ca"];

const TRAVEL_TERMS: &[&str] = &["travel", "pocket", "mini"];

fn made_in_usa(title: &str, body: &str, product_type: &str) -> bool {
    if product_type.contains("made in usa") {
        return true;
    }

    if title.contains("usa") && body.contains("made") {
        let explicit = MADE_IN_USA_RE.is_match(body)
            || body.contains("american-made")
            || body.contains("american made");
        let hand_crafted = body.contains("hand-crafted in")
            && HAND_CRAFTED_MARKERS.iter().any(|s| body.contains(s));
        if explicit || hand_crafted {
            return true;
        }
    }

    MADE_IN_CITY_RE.is_match(body)
}

fn heady(title: &str, body: &str) -> bool {
    if title.contains("heady") || title.contains("collab") {
        return true;
    }

    // Body signals only count on pages that talk about heady glass at all.
    if !(body.contains("heady glass") || body.contains("heady dab rig")) {
        return false;
    }

    HEADY_CATEGORY_RE.is_match(body)
        || body.contains("one-of-a-kind")
        || body.contains("one of a kind")
        || (body.contains("collab") && body.contains("artist"))
}

/// Every style that applies, in a fixed order, without repeats.
pub fn extract_styles(title: &str, body: &str, product_type: &str) -> Vec<Tag> {
    let title = title.to_lowercase();
    let body = body.to_lowercase();
    let product_type = product_type.to_lowercase();

    let signals = [
        ("made-in-usa", made_in_usa(&title, &body, &product_type)),
        ("heady", heady(&title, &body)),
        ("animal", ANIMAL_TERMS.iter().any(|t| title.contains(t))),
        ("brand-highlight", product_type.contains("wyn brands")),
        ("travel-friendly", TRAVEL_TERMS.iter().any(|t| title.contains(t))),
    ];

    signals
        .into_iter()
        .filter(|(_, applies)| *applies)
        .map(|(style, _)| Tag::new(Dimension::Style, style))
        .collect()
}
