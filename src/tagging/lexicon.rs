//! Static lookup tables: brand phrases and the catalog type table.

use crate::domain::model::{Tag, TaxonomyProfile};
use std::sync::LazyLock;

/// Vendor whose products this catalog manages.
pub const DEFAULT_MANAGED_VENDOR: &str = "what you need";

/// Brand phrase → tag. Phrases are matched against the lowercased title
/// padded with a single space on both ends, so the space variants pin a
/// phrase to word edges.
pub const BRANDS: &[(&str, &str)] = &[
    ("raw ", "brand:raw"),
    (" raw ", "brand:raw"),
    ("zig zag", "brand:zig-zag"),
    ("zig-zag", "brand:zig-zag"),
    ("zigzag", "brand:zig-zag"),
    ("vibes ", "brand:vibes"),
    (" vibes", "brand:vibes"),
    ("elements ", "brand:elements"),
    (" elements", "brand:elements"),
    ("cookies ", "brand:cookies"),
    (" cookies", "brand:cookies"),
    ("lookah", "brand:lookah"),
    ("puffco", "brand:puffco"),
    ("maven ", "brand:maven"),
    (" maven ", "brand:maven"),
    ("g-pen", "brand:g-pen"),
    ("g pen", "brand:g-pen"),
    ("gpen", "brand:g-pen"),
    ("only quartz", "brand:only-quartz"),
    ("eo vape", "brand:eo-vape"),
    ("eo-vape", "brand:eo-vape"),
    ("monark", "brand:monark"),
    ("710 sci", "brand:710-sci"),
    ("710-sci", "brand:710-sci"),
    ("710sci", "brand:710-sci"),
    ("peaselburg", "brand:peaselburg"),
    ("scorch ", "brand:scorch"),
    (" scorch", "brand:scorch"),
    ("empire glassworks", "brand:empire-glassworks"),
    ("mj arsenal", "brand:mj-arsenal"),
    ("ooze ", "brand:ooze"),
    (" ooze", "brand:ooze"),
    ("pulsar", "brand:pulsar"),
    ("higher standards", "brand:higher-standards"),
    ("grav ", "brand:grav"),
    (" grav ", "brand:grav"),
    ("famous x", "brand:famous-x"),
    ("famous-x", "brand:famous-x"),
    ("juicy jay", "brand:juicy-jay"),
    ("juicy jays", "brand:juicy-jay"),
    ("high hemp", "brand:high-hemp"),
    ("king palm", "brand:king-palm"),
    ("clipper", "brand:clipper"),
    (" bic ", "brand:bic"),
    ("blazer ", "brand:blazer"),
    (" blazer", "brand:blazer"),
    ("special blue", "brand:special-blue"),
    ("newport ", "brand:newport"),
    ("zico", "brand:zico"),
    ("santa cruz shredder", "brand:santa-cruz-shredder"),
    ("space case", "brand:space-case"),
    ("sharpstone", "brand:sharpstone"),
    ("cali crusher", "brand:cali-crusher"),
    ("kannastor", "brand:kannastor"),
    ("otto ", "brand:otto"),
    (" otto", "brand:otto"),
    ("shine ", "brand:shine"),
    ("blazy susan", "brand:blazy-susan"),
    (" ocb ", "brand:ocb"),
    ("ocb ", "brand:ocb"),
    (" job ", "brand:job"),
    ("randy's", "brand:randy"),
    ("randys", "brand:randy"),
    ("dab nation", "brand:dab-nation"),
];

/// `BRANDS` ordered longest phrase first. The sort is stable, so equal
/// lengths keep table order.
pub static BRANDS_BY_LENGTH: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    let mut brands = BRANDS.to_vec();
    brands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    brands
});

/// One row of the type table. `None` taxonomy fields mark theme types
/// whose taxonomy has to come from the item's text.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    pub product_type: &'static str,
    pub pillar: Option<&'static str>,
    pub family: Option<&'static str>,
    pub format: Option<&'static str>,
    pub uses: &'static [&'static str],
    pub default_material: &'static [&'static str],
    pub style_override: &'static [&'static str],
}

impl TypeEntry {
    const fn device(
        product_type: &'static str,
        pillar: &'static str,
        family: &'static str,
        format: &'static str,
        uses: &'static [&'static str],
        default_material: &'static [&'static str],
    ) -> Self {
        Self {
            product_type,
            pillar: Some(pillar),
            family: Some(family),
            format: Some(format),
            uses,
            default_material,
            style_override: &[],
        }
    }

    const fn theme(
        product_type: &'static str,
        default_material: &'static [&'static str],
        style_override: &'static [&'static str],
    ) -> Self {
        Self {
            product_type,
            pillar: None,
            family: None,
            format: None,
            uses: &[],
            default_material,
            style_override,
        }
    }

    pub fn to_profile(&self) -> TaxonomyProfile {
        TaxonomyProfile {
            pillar: self.pillar.map(Tag::from),
            family: self.family.map(Tag::from),
            format: self.format.map(Tag::from),
            uses: self.uses.iter().copied().map(Tag::from).collect(),
            default_material: self.default_material.iter().copied().map(Tag::from).collect(),
            style_override: self.style_override.iter().copied().map(Tag::from).collect(),
        }
    }
}

const GLASS: &[&str] = &["material:glass"];
const METAL: &[&str] = &["material:metal"];

pub const TYPE_TABLE: &[TypeEntry] = &[
    TypeEntry::device(
        "bongs & water pipes",
        "pillar:smokeshop-device",
        "family:glass-bong",
        "format:bong",
        &["use:flower-smoking"],
        GLASS,
    ),
    TypeEntry::device(
        "dab rigs / oil rigs",
        "pillar:smokeshop-device",
        "family:glass-rig",
        "format:rig",
        &["use:dabbing"],
        GLASS,
    ),
    TypeEntry::device(
        "bubblers",
        "pillar:smokeshop-device",
        "family:bubbler",
        "format:bubbler",
        &["use:flower-smoking"],
        GLASS,
    ),
    TypeEntry::device(
        "hand pipes",
        "pillar:smokeshop-device",
        "family:spoon-pipe",
        "format:pipe",
        &["use:flower-smoking"],
        GLASS,
    ),
    TypeEntry::device(
        "one hitters & chillums",
        "pillar:smokeshop-device",
        "family:chillum-onehitter",
        "format:pipe",
        &["use:flower-smoking"],
        GLASS,
    ),
    TypeEntry::device(
        "nectar collectors & straws",
        "pillar:smokeshop-device",
        "family:nectar-collector",
        "format:nectar-collector",
        &["use:dabbing"],
        GLASS,
    ),
    TypeEntry::device(
        "flower bowls",
        "pillar:accessory",
        "family:flower-bowl",
        "format:accessory",
        &["use:flower-smoking"],
        GLASS,
    ),
    TypeEntry::device(
        "carb caps",
        "pillar:accessory",
        "family:carb-cap",
        "format:cap",
        &["use:dabbing"],
        GLASS,
    ),
    TypeEntry::device(
        "dab tools / dabbers",
        "pillar:accessory",
        "family:dab-tool",
        "format:tool",
        &["use:dabbing"],
        METAL,
    ),
    TypeEntry::device(
        "grinders",
        "pillar:accessory",
        "family:grinder",
        "format:grinder",
        &["use:flower-smoking"],
        METAL,
    ),
    TypeEntry::device(
        "rolling papers",
        "pillar:accessory",
        "family:rolling-paper",
        "format:paper",
        &["use:rolling"],
        &[],
    ),
    TypeEntry::device(
        "torches",
        "pillar:accessory",
        "family:torch",
        "format:torch",
        &["use:dabbing"],
        METAL,
    ),
    TypeEntry::device(
        "electronics",
        "pillar:accessory",
        "family:vape-battery",
        "format:battery-mod",
        &["use:dabbing"],
        METAL,
    ),
    // Pillar is known, family comes from content.
    TypeEntry {
        product_type: "essentials & accessories",
        pillar: Some("pillar:accessory"),
        family: None,
        format: Some("format:accessory"),
        uses: &["use:flower-smoking"],
        default_material: GLASS,
        style_override: &[],
    },
    TypeEntry::device(
        "quartz",
        "pillar:accessory",
        "family:banger",
        "format:banger",
        &["use:dabbing"],
        &["material:quartz"],
    ),
    TypeEntry::theme("silicone", &["material:silicone"], &[]),
    TypeEntry::theme("pendants", GLASS, &[]),
    TypeEntry::device(
        "packaging",
        "pillar:packaging",
        "family:storage-accessory",
        "format:box",
        &["use:storage"],
        &[],
    ),
    TypeEntry::theme("made in usa", GLASS, &["style:made-in-usa"]),
    TypeEntry::theme("wyn brands", GLASS, &["style:brand-highlight"]),
];

/// Case-insensitive exact lookup of a catalog type.
pub fn lookup_type(product_type: &str) -> Option<TaxonomyProfile> {
    let key = product_type.trim().to_lowercase();
    TYPE_TABLE
        .iter()
        .find(|entry| entry.product_type == key)
        .map(TypeEntry::to_profile)
}

/// Profile used when neither the type table nor the item's text says
/// anything about what it is.
pub fn fallback_profile() -> TaxonomyProfile {
    TaxonomyProfile {
        pillar: Some(Tag::from("pillar:accessory")),
        family: Some(Tag::from("family:storage-accessory")),
        format: Some(Tag::from("format:accessory")),
        uses: vec![Tag::from("use:flower-smoking")],
        default_material: vec![Tag::from("material:glass")],
        style_override: Vec::new(),
    }
}
