//! Body text normalization applied before classification.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decode character references with the HTML5 tokenizer: the full named
/// table, legacy names without a trailing `;`, and numeric references.
/// Markup is escaped first so the whole input is read as one text run and
/// comes back with its tags intact.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let fragment = Html::parse_fragment(&s.replace('<', "&lt;"));
    let decoded: String = fragment.root_element().text().collect();
    decoded
}

/// Turn an HTML product description into plain text: decode entities,
/// replace markup with spaces, collapse whitespace and trim.
///
/// Entities are decoded before markup is removed, so escaped markup
/// (`&lt;b&gt;`) is stripped as well.
pub fn normalize_html(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let decoded = decode_entities(raw);
    let stripped = TAG_RE.replace_all(&decoded, " ");
    WHITESPACE_RE
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}
