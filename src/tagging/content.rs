//! Infers pillar/family/format/use from keywords in the title and body.
//!
//! Rules are tried in order and the first match wins, so more specific
//! keywords ("rig", "bubbler") sit ahead of generic ones ("pipe", "box").
//! Title rules come first; the last two rules only look at the body.

use crate::domain::model::{Tag, TaxonomyProfile};
use crate::tagging::char_prefix;

/// Taxonomy produced by a content rule. All four fields are always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taxon {
    pub pillar: &'static str,
    pub family: &'static str,
    pub format: &'static str,
    pub uses: &'static [&'static str],
}

impl Taxon {
    pub fn to_profile(self) -> TaxonomyProfile {
        TaxonomyProfile {
            pillar: Some(Tag::from(self.pillar)),
            family: Some(Tag::from(self.family)),
            format: Some(Tag::from(self.format)),
            uses: self.uses.iter().copied().map(Tag::from).collect(),
            default_material: Vec::new(),
            style_override: Vec::new(),
        }
    }
}

const fn taxon(
    pillar: &'static str,
    family: &'static str,
    format: &'static str,
    uses: &'static [&'static str],
) -> Taxon {
    Taxon {
        pillar,
        family,
        format,
        uses,
    }
}

const DEVICE: &str = "pillar:smokeshop-device";
const ACCESSORY: &str = "pillar:accessory";
const DABBING: &[&str] = &["use:dabbing"];
const FLOWER: &[&str] = &["use:flower-smoking"];
const ROLLING: &[&str] = &["use:rolling"];
const STORAGE: &[&str] = &["use:storage"];

pub const GLASS_RIG: Taxon = taxon(DEVICE, "family:glass-rig", "format:rig", DABBING);
pub const SILICONE_RIG: Taxon = taxon(DEVICE, "family:silicone-rig", "format:rig", DABBING);
pub const GLASS_BONG: Taxon = taxon(DEVICE, "family:glass-bong", "format:bong", FLOWER);
pub const SILICONE_BONG: Taxon = taxon(DEVICE, "family:silicone-bong", "format:bong", FLOWER);
pub const BUBBLER: Taxon = taxon(DEVICE, "family:bubbler", "format:bubbler", FLOWER);
pub const JOINT_BUBBLER: Taxon = taxon(
    DEVICE,
    "family:joint-bubbler",
    "format:bubbler",
    &["use:flower-smoking", "use:setup-protection"],
);
pub const SPOON_PIPE: Taxon = taxon(DEVICE, "family:spoon-pipe", "format:pipe", FLOWER);
pub const CHILLUM: Taxon = taxon(DEVICE, "family:chillum-onehitter", "format:pipe", FLOWER);
pub const NECTAR_COLLECTOR: Taxon = taxon(
    DEVICE,
    "family:nectar-collector",
    "format:nectar-collector",
    DABBING,
);
pub const ELECTRONIC_NECTAR_COLLECTOR: Taxon = taxon(
    DEVICE,
    "family:electronic-nectar-collector",
    "format:nectar-collector",
    DABBING,
);
pub const BANGER: Taxon = taxon(ACCESSORY, "family:banger", "format:banger", DABBING);
pub const CARB_CAP: Taxon = taxon(ACCESSORY, "family:carb-cap", "format:cap", DABBING);
pub const FLOWER_BOWL: Taxon = taxon(ACCESSORY, "family:flower-bowl", "format:accessory", FLOWER);
pub const DAB_TOOL: Taxon = taxon(ACCESSORY, "family:dab-tool", "format:tool", DABBING);
pub const GRINDER: Taxon = taxon(
    ACCESSORY,
    "family:grinder",
    "format:grinder",
    &["use:preparation"],
);
pub const ROLLING_PAPER: Taxon = taxon(ACCESSORY, "family:rolling-paper", "format:paper", ROLLING);
pub const TORCH: Taxon = taxon(ACCESSORY, "family:torch", "format:torch", DABBING);
pub const ASH_CATCHER: Taxon = taxon(
    ACCESSORY,
    "family:ash-catcher",
    "format:accessory",
    &["use:setup-protection", "use:flower-smoking"],
);
pub const DOWNSTEM: Taxon = taxon(ACCESSORY, "family:downstem", "format:accessory", FLOWER);
pub const TRAY: Taxon = taxon(ACCESSORY, "family:tray", "format:tray", ROLLING);
pub const JAR: Taxon = taxon(ACCESSORY, "family:storage-accessory", "format:jar", STORAGE);
pub const PACKAGING_BOX: Taxon = taxon(
    "pillar:packaging",
    "family:storage-accessory",
    "format:box",
    STORAGE,
);
pub const VAPE_BATTERY: Taxon = taxon(
    ACCESSORY,
    "family:vape-battery",
    "format:battery-mod",
    DABBING,
);
pub const VAPE_COIL: Taxon = taxon(ACCESSORY, "family:vape-coil", "format:coil", DABBING);
pub const MERCH_PENDANT: Taxon = taxon("pillar:merch", "family:merch-pendant", "format:pendant", &[]);
pub const MATCHES: Taxon = taxon(
    ACCESSORY,
    "family:rolling-accessory",
    "format:accessory",
    ROLLING,
);
pub const CLEANER: Taxon = taxon(
    ACCESSORY,
    "family:rolling-accessory",
    "format:accessory",
    FLOWER,
);

/// Lowercased text of one item.
#[derive(Debug, Clone)]
pub struct Evidence {
    pub title: String,
    pub body: String,
}

impl Evidence {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            body: body.to_lowercase(),
        }
    }

    pub fn title_has(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.title.contains(k))
    }

    pub fn body_has(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.body.contains(k))
    }
}

pub struct ContentRule {
    pub name: &'static str,
    pub when: fn(&Evidence) -> bool,
    pub then: fn(&Evidence) -> Taxon,
}

/// How many leading body characters count as "the opening of the
/// description" for pendant carb-cap claims.
const PENDANT_CLAIM_WINDOW: usize = 300;
const PENDANT_PIPE_WINDOW: usize = 400;

fn pendant(e: &Evidence) -> Taxon {
    let opening = char_prefix(&e.body, PENDANT_CLAIM_WINDOW);

    let is_carb_cap = e.title_has(&["carb cap"])
        || (opening.contains("is a") && opening.contains("carb cap"))
        || opening.contains("carb cap that")
        || opening.contains("carb cap pendant");
    if is_carb_cap {
        return CARB_CAP;
    }

    if e.title_has(&["pipe"]) {
        return SPOON_PIPE;
    }

    if opening.contains("pipe") && char_prefix(&e.body, PENDANT_PIPE_WINDOW).contains("hand pipe") {
        return SPOON_PIPE;
    }

    MERCH_PENDANT
}

pub static RULES: &[ContentRule] = &[
    ContentRule {
        name: "rig",
        when: |e| e.title_has(&["rig", "recycler"]),
        then: |e| if e.title_has(&["silicone"]) { SILICONE_RIG } else { GLASS_RIG },
    },
    ContentRule {
        name: "bong",
        when: |e| e.title_has(&["bong", "water pipe", "waterpipe", "beaker"]),
        then: |e| if e.title_has(&["silicone"]) { SILICONE_BONG } else { GLASS_BONG },
    },
    ContentRule {
        name: "bubbler",
        when: |e| e.title_has(&["bubbler"]),
        then: |e| {
            if e.title_has(&["joint", "pre-roll", "preroll"]) {
                JOINT_BUBBLER
            } else {
                BUBBLER
            }
        },
    },
    ContentRule {
        name: "hand-pipe",
        when: |e| e.title_has(&["pipe", "spoon", "sherlock", "steamroller", "hammer"]),
        then: |_| SPOON_PIPE,
    },
    ContentRule {
        name: "chillum",
        when: |e| e.title_has(&["chillum", "one hitter", "one-hitter", "taster"]),
        then: |_| CHILLUM,
    },
    ContentRule {
        name: "nectar-collector",
        when: |e| e.title_has(&["nectar collector", "honey straw", "dab straw"]),
        then: |e| {
            if e.title_has(&["electronic", "electric"]) {
                ELECTRONIC_NECTAR_COLLECTOR
            } else {
                NECTAR_COLLECTOR
            }
        },
    },
    ContentRule {
        name: "banger",
        when: |e| e.title_has(&["banger", "slurper"]),
        then: |_| BANGER,
    },
    ContentRule {
        name: "carb-cap",
        when: |e| e.title_has(&["carb cap", "carbcap"]) || (e.title_has(&["cap"]) && e.body_has(&["dab"])),
        then: |_| CARB_CAP,
    },
    ContentRule {
        name: "flower-bowl",
        when: |e| e.title_has(&["bowl", "slide"]),
        then: |_| FLOWER_BOWL,
    },
    ContentRule {
        name: "dab-tool",
        when: |e| e.title_has(&["dab tool", "dabber", "tool"]),
        then: |_| DAB_TOOL,
    },
    ContentRule {
        name: "grinder",
        when: |e| e.title_has(&["grinder"]),
        then: |_| GRINDER,
    },
    ContentRule {
        name: "rolling-paper",
        when: |e| e.title_has(&["paper", "cone", "rolling"]),
        then: |_| ROLLING_PAPER,
    },
    ContentRule {
        name: "torch",
        when: |e| e.title_has(&["torch"]),
        then: |_| TORCH,
    },
    ContentRule {
        name: "ash-catcher",
        when: |e| e.title_has(&["ash catcher", "ashcatcher"]),
        then: |_| ASH_CATCHER,
    },
    ContentRule {
        name: "downstem",
        when: |e| e.title_has(&["downstem"]),
        then: |_| DOWNSTEM,
    },
    ContentRule {
        name: "tray",
        when: |e| e.title_has(&["tray"]),
        then: |_| TRAY,
    },
    ContentRule {
        name: "storage",
        when: |e| e.title_has(&["jar", "stash", "container", "storage"]),
        then: |_| JAR,
    },
    ContentRule {
        name: "packaging",
        when: |e| e.title_has(&["box"]),
        then: |_| PACKAGING_BOX,
    },
    ContentRule {
        name: "vape-battery",
        when: |e| e.title_has(&["battery", "vape pen"]),
        then: |_| VAPE_BATTERY,
    },
    ContentRule {
        name: "vape-coil",
        when: |e| e.title_has(&["coil", "atomizer"]),
        then: |_| VAPE_COIL,
    },
    ContentRule {
        name: "pendant",
        when: |e| e.title_has(&["pendant"]),
        then: pendant,
    },
    ContentRule {
        name: "matches",
        when: |e| e.title_has(&["match"]),
        then: |_| MATCHES,
    },
    ContentRule {
        name: "drop-down",
        when: |e| e.title_has(&["drop down", "dropdown"]),
        then: |_| DOWNSTEM,
    },
    ContentRule {
        name: "ashtray",
        when: |e| e.title_has(&["ashtray"]),
        then: |_| TRAY,
    },
    ContentRule {
        name: "cleaner",
        when: |e| e.title_has(&["cleaner"]),
        then: |_| CLEANER,
    },
    ContentRule {
        name: "body-dab-rig",
        when: |e| e.body_has(&["dab rig", "dabbing"]),
        then: |_| GLASS_RIG,
    },
    ContentRule {
        name: "body-hand-pipe",
        when: |e| e.body_has(&["hand pipe", "flower pipe"]),
        then: |_| SPOON_PIPE,
    },
];

/// First matching rule and the taxonomy it assigns.
pub fn match_rule(title: &str, body: &str) -> Option<(&'static str, Taxon)> {
    let evidence = Evidence::new(title, body);
    RULES
        .iter()
        .find(|rule| (rule.when)(&evidence))
        .map(|rule| (rule.name, (rule.then)(&evidence)))
}

pub fn classify_from_content(title: &str, body: &str) -> Option<TaxonomyProfile> {
    match_rule(title, body).map(|(_, taxon)| taxon.to_profile())
}
