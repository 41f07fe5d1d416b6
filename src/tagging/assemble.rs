use crate::domain::model::{Item, TagList, TaxonomyProfile};
use crate::tagging::extract::{
    extract_brand, extract_bundle, extract_capacity, extract_joint_details, extract_length,
    extract_materials, extract_styles,
};

/// Build the final tag list. Sections are appended in a fixed order that
/// downstream consumers rely on (pillar and family first); repeats keep
/// their first position.
pub fn assemble(profile: &TaxonomyProfile, item: &Item) -> TagList {
    let mut tags = TagList::new();

    tags.extend(profile.pillar.clone());
    tags.extend(profile.family.clone());
    tags.extend(extract_brand(&item.title));

    let materials = extract_materials(&item.title, &item.body);
    if materials.is_empty() {
        tags.extend(profile.default_material.iter().cloned());
    } else {
        tags.extend(materials);
    }

    tags.extend(profile.format.clone());
    tags.extend(profile.uses.iter().cloned());
    tags.extend(extract_joint_details(&item.title, &item.body));
    tags.extend(extract_length(&item.title));
    tags.extend(extract_capacity(&item.title));

    let mut styles = extract_styles(&item.title, &item.body, &item.product_type);
    for style in &profile.style_override {
        if !styles.contains(style) {
            styles.push(style.clone());
        }
    }
    tags.extend(styles);

    tags.extend(extract_bundle(&item.title));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Tag;
    use crate::tagging::lexicon::{fallback_profile, lookup_type};

    #[test]
    fn test_section_order() {
        let profile = lookup_type("dab rigs / oil rigs").unwrap();
        let item = Item::new(
            "Lookah Mini Recycler 14mm Female 7 inch 5 Pack",
            "",
            "Dab Rigs / Oil Rigs",
            "What You Need",
        );
        let tags = assemble(&profile, &item);
        assert_eq!(
            tags.join(", "),
            "pillar:smokeshop-device, family:glass-rig, brand:lookah, material:glass, \
             format:rig, use:dabbing, joint_size:14mm, joint_gender:female, length:7in, \
             style:travel-friendly, bundle:5-pack"
        );
    }

    #[test]
    fn test_found_materials_replace_defaults() {
        let profile = lookup_type("quartz").unwrap();
        let item = Item::new("Titanium Nail", "", "Quartz", "");
        let tags = assemble(&profile, &item);
        assert!(tags.contains("material:titanium"));
        assert!(!tags.contains("material:quartz"));
    }

    #[test]
    fn test_style_override_appended_once() {
        let mut profile = fallback_profile();
        profile.style_override = vec![Tag::from("style:made-in-usa")];
        let item = Item::new("Spoon", "", "Made in USA", "");
        let tags = assemble(&profile, &item);
        assert_eq!(tags.of_dimension(crate::domain::model::Dimension::Style).len(), 1);
    }

    #[test]
    fn test_empty_item_yields_profile_only() {
        let tags = assemble(&fallback_profile(), &Item::default());
        assert_eq!(
            tags.join(", "),
            "pillar:accessory, family:storage-accessory, material:glass, format:accessory, use:flower-smoking"
        );
    }
}
