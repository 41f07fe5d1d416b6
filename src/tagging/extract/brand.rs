use crate::domain::model::Tag;
use crate::tagging::lexicon::BRANDS_BY_LENGTH;

/// Brand named in the title. The body is not consulted: descriptions
/// often compare against other brands.
pub fn extract_brand(title: &str) -> Option<Tag> {
    let padded = format!(" {} ", title.to_lowercase());
    BRANDS_BY_LENGTH
        .iter()
        .find(|(phrase, _)| padded.contains(phrase))
        .map(|(_, tag)| Tag::from(*tag))
}
