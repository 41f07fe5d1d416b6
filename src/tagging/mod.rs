//! Deterministic facet tagging for catalog items.
//!
//! ```text
//! vendor gate → (type table ∥ content rules) → reconcile → extractors → TagList
//! ```
//!
//! Every item is classified from its own text only; nothing is cached or
//! shared between calls, so batches can be classified in parallel.

pub mod assemble;
pub mod content;
pub mod extract;
pub mod lexicon;
pub mod reconcile;

use crate::domain::model::{Classification, Item, ResolutionTier, TagList};
use lexicon::DEFAULT_MANAGED_VENDOR;

pub use assemble::assemble;
pub use content::classify_from_content;
pub use lexicon::lookup_type;
pub use reconcile::{reconcile, Resolution};

/// Longest prefix of `s` holding at most `n` characters.
pub(crate) fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Tags for one item together with how its taxonomy was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub tags: TagList,
    pub tier: ResolutionTier,
    pub content_rule: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Tagger {
    managed_vendor: String,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new(DEFAULT_MANAGED_VENDOR)
    }
}

impl Tagger {
    pub fn new(managed_vendor: impl AsRef<str>) -> Self {
        Self {
            managed_vendor: managed_vendor.as_ref().trim().to_lowercase(),
        }
    }

    pub fn managed_vendor(&self) -> &str {
        &self.managed_vendor
    }

    /// Items from other vendors are outside the managed catalog.
    pub fn is_eligible(&self, vendor: &str) -> bool {
        vendor.trim().to_lowercase() == self.managed_vendor
    }

    pub fn classify(&self, item: &Item) -> Classification {
        match self.explain(item) {
            Some(explanation) => Classification::Tagged(explanation.tags),
            None => Classification::NotApplicable,
        }
    }

    /// Same as [`Tagger::classify`], keeping the resolution details.
    /// Returns `None` for items that fail the vendor gate.
    pub fn explain(&self, item: &Item) -> Option<Explanation> {
        if !self.is_eligible(&item.vendor) {
            tracing::trace!("Skipping item from vendor '{}'", item.vendor);
            return None;
        }

        let item = Item {
            title: item.title.trim().to_string(),
            body: item.body.clone(),
            product_type: item.product_type.trim().to_string(),
            vendor: item.vendor.clone(),
        };

        let type_profile = lookup_type(&item.product_type);
        let content_match = content::match_rule(&item.title, &item.body);
        let content_rule = content_match.map(|(name, _)| name);
        let content_profile = content_match.map(|(_, taxon)| taxon.to_profile());

        let Resolution { profile, tier } = reconcile(type_profile, content_profile, &item.title);
        let tags = assemble(&profile, &item);

        tracing::debug!(
            "Tagged '{}' via {:?} (content rule: {}) -> {} tags",
            item.title,
            tier,
            content_rule.unwrap_or("none"),
            tags.len()
        );

        Some(Explanation {
            tags,
            tier,
            content_rule,
        })
    }
}

/// Classify with the default managed vendor.
pub fn classify(item: &Item) -> Classification {
    Tagger::default().classify(item)
}
