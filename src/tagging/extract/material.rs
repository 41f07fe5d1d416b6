use crate::domain::model::{Dimension, Tag};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static MATERIAL_SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"material[:\s]+(\w+)").unwrap());

/// Known materials, declared in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Material {
    Glass,
    Borosilicate,
    Quartz,
    Silicone,
    Titanium,
    StainlessSteel,
    Ceramic,
    Wood,
    Metal,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Glass => "glass",
            Material::Borosilicate => "borosilicate",
            Material::Quartz => "quartz",
            Material::Silicone => "silicone",
            Material::Titanium => "titanium",
            Material::StainlessSteel => "stainless-steel",
            Material::Ceramic => "ceramic",
            Material::Wood => "wood",
            Material::Metal => "metal",
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::new(Dimension::Material, self.as_str())
    }
}

fn scan_title(title: &str, found: &mut BTreeSet<Material>) {
    if title.contains("borosilicate") {
        found.insert(Material::Glass);
        found.insert(Material::Borosilicate);
    } else if title.contains("glass") {
        found.insert(Material::Glass);
    }

    let keywords: [(&[&str], Material); 7] = [
        (&["quartz"], Material::Quartz),
        (&["silicone"], Material::Silicone),
        (&["titanium"], Material::Titanium),
        (&["stainless"], Material::StainlessSteel),
        (&["ceramic"], Material::Ceramic),
        (&["wood", "wooden"], Material::Wood),
        (&["metal", "aluminum"], Material::Metal),
    ];
    for (words, material) in keywords {
        if words.iter().any(|w| title.contains(w)) {
            found.insert(material);
        }
    }
}

/// Map the word after "material:" to a material family.
fn spec_material(word: &str) -> &'static [Material] {
    if word.contains("borosilicate") || word.contains("boro") {
        &[Material::Glass, Material::Borosilicate]
    } else if word.contains("glass") {
        &[Material::Glass]
    } else if word.contains("quartz") {
        &[Material::Quartz]
    } else if word.contains("silicone") {
        &[Material::Silicone]
    } else if word.contains("titanium") {
        &[Material::Titanium]
    } else if word.contains("ceramic") {
        &[Material::Ceramic]
    } else if word.contains("wood") {
        &[Material::Wood]
    } else if word.contains("metal") || word.contains("aluminum") {
        &[Material::Metal]
    } else {
        &[]
    }
}

fn scan_body(body: &str, found: &mut BTreeSet<Material>) {
    if body.contains("borosilicate") {
        found.insert(Material::Glass);
        found.insert(Material::Borosilicate);
    }

    if let Some(caps) = MATERIAL_SPEC_RE.captures(body) {
        found.extend(spec_material(&caps[1]).iter().copied());
    }
}

/// Materials named in the title, plus body evidence from an explicit
/// "Material: X" line or a borosilicate mention. Returns the union in
/// `Material` declaration order; empty when nothing was found.
pub fn extract_materials(title: &str, body: &str) -> Vec<Tag> {
    let mut found = BTreeSet::new();
    scan_title(&title.to_lowercase(), &mut found);
    scan_body(&body.to_lowercase(), &mut found);
    found.iter().map(Material::tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn materials(title: &str, body: &str) -> Vec<String> {
        extract_materials(title, body)
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_borosilicate_implies_glass() {
        assert_eq!(
            materials("Borosilicate Beaker", ""),
            vec!["material:glass", "material:borosilicate"]
        );
    }

    #[test]
    fn test_multi_material_union() {
        assert_eq!(
            materials("Silicone & Glass Hybrid Rig", ""),
            vec!["material:glass", "material:silicone"]
        );
        assert_eq!(
            materials("Wooden Dugout with Aluminum Bat", ""),
            vec!["material:wood", "material:metal"]
        );
    }

    #[test]
    fn test_stainless_title_only() {
        assert_eq!(
            materials("Stainless Dab Tool", ""),
            vec!["material:stainless-steel"]
        );
        // the material line does not map stainless
        assert!(materials("Dab Tool", "Material: Stainless steel").is_empty());
    }

    #[test]
    fn test_body_material_line() {
        assert_eq!(
            materials("Carb Cap", "Height: 2in Material: Quartz Joint: none"),
            vec!["material:quartz"]
        );
        assert_eq!(
            materials("Carb Cap", "material boro glass"),
            vec!["material:glass", "material:borosilicate"]
        );
    }

    #[test]
    fn test_body_borosilicate_anywhere() {
        assert_eq!(
            materials("Spoon", "Made from thick borosilicate tubing"),
            vec!["material:glass", "material:borosilicate"]
        );
    }

    #[test]
    fn test_body_plain_glass_mention_is_ignored() {
        assert!(materials("Spoon", "Pairs nicely with any glass piece").is_empty());
    }

    #[test]
    fn test_no_materials() {
        assert!(materials("", "").is_empty());
        assert!(materials("Hemp Wick", "Natural beeswax").is_empty());
    }
}
