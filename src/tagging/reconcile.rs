//! Merges the type-table profile with the content profile.
//!
//! Priority: the type table is trusted when it is fully specified, item
//! text fills in or corrects it, and a fixed fallback covers items with no
//! evidence at all.

use crate::domain::model::{ResolutionTier, TaxonomyProfile};
use crate::tagging::lexicon::fallback_profile;

/// Title keywords that mark items commonly filed under the wrong type
/// (an ashtray listed as rolling papers, matches under accessories).
pub const MISCATEGORIZATION_KEYWORDS: &[&str] = &[
    "ashtray",
    "tray",
    "match",
    "cleaner",
    "drop down",
    "dropdown",
    "pendant",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub profile: TaxonomyProfile,
    pub tier: ResolutionTier,
}

/// Content taxonomy replaces pillar/family/format/use. Default materials
/// and style overrides stay with the type entry.
fn overlay(mut base: TaxonomyProfile, content: TaxonomyProfile) -> TaxonomyProfile {
    base.pillar = content.pillar;
    base.family = content.family;
    base.format = content.format;
    base.uses = content.uses;
    base
}

fn is_miscategorized(title: &str) -> bool {
    let title = title.to_lowercase();
    MISCATEGORIZATION_KEYWORDS.iter().any(|k| title.contains(k))
}

pub fn reconcile(
    type_profile: Option<TaxonomyProfile>,
    content_profile: Option<TaxonomyProfile>,
    title: &str,
) -> Resolution {
    let (profile, tier) = match (type_profile, content_profile) {
        (None, Some(content)) => (content, ResolutionTier::ContentInferred),
        (None, None) => (TaxonomyProfile::default(), ResolutionTier::Fallback),
        (Some(typed), Some(content)) if !typed.is_complete() => {
            (overlay(typed, content), ResolutionTier::ContentInferred)
        }
        (Some(typed), Some(content)) if is_miscategorized(title) => {
            (overlay(typed, content), ResolutionTier::ContentOverride)
        }
        (Some(typed), _) => (typed, ResolutionTier::TypeTable),
    };

    if profile.pillar.is_none() {
        return Resolution {
            profile: fallback_profile(),
            tier: ResolutionTier::Fallback,
        };
    }

    Resolution { profile, tier }
}
