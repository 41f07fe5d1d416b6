use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Facet dimensions a tag can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Pillar,
    Family,
    Format,
    Use,
    Material,
    Brand,
    JointSize,
    JointAngle,
    JointGender,
    Length,
    Capacity,
    Style,
    Bundle,
}

impl Dimension {
    pub const ALL: [Dimension; 13] = [
        Dimension::Pillar,
        Dimension::Family,
        Dimension::Format,
        Dimension::Use,
        Dimension::Material,
        Dimension::Brand,
        Dimension::JointSize,
        Dimension::JointAngle,
        Dimension::JointGender,
        Dimension::Length,
        Dimension::Capacity,
        Dimension::Style,
        Dimension::Bundle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Pillar => "pillar",
            Dimension::Family => "family",
            Dimension::Format => "format",
            Dimension::Use => "use",
            Dimension::Material => "material",
            Dimension::Brand => "brand",
            Dimension::JointSize => "joint_size",
            Dimension::JointAngle => "joint_angle",
            Dimension::JointGender => "joint_gender",
            Dimension::Length => "length",
            Dimension::Capacity => "capacity",
            Dimension::Style => "style",
            Dimension::Bundle => "bundle",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `"<dimension>:<value>"` facet tag. Opaque apart from the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(dimension: Dimension, value: impl AsRef<str>) -> Self {
        Tag(format!("{}:{}", dimension.as_str(), value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dimension named by the prefix, if it is a known one.
    pub fn dimension(&self) -> Option<Dimension> {
        let (prefix, _) = self.0.split_once(':')?;
        Dimension::ALL.into_iter().find(|d| d.as_str() == prefix)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag(s.to_string())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered tag sequence with no repeated tag string. Pushing a tag that is
/// already present keeps the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<Tag>,
    #[serde(skip)]
    seen: HashSet<Tag>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the tag was already present.
    pub fn push(&mut self, tag: Tag) -> bool {
        if self.seen.contains(&tag) {
            return false;
        }
        self.seen.insert(tag.clone());
        self.tags.push(tag);
        true
    }

    pub fn extend<I: IntoIterator<Item = Tag>>(&mut self, tags: I) {
        for tag in tags {
            self.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn of_dimension(&self, dimension: Dimension) -> Vec<&Tag> {
        self.tags
            .iter()
            .filter(|t| t.dimension() == Some(dimension))
            .collect()
    }

    pub fn join(&self, separator: &str) -> String {
        self.tags
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<Tag> for TagList {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut list = TagList::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// Text attributes of one catalog item. `body` is expected to be plain
/// text already (see `utils::text::normalize_html`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub body: String,
    pub product_type: String,
    pub vendor: String,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        product_type: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            product_type: product_type.into(),
            vendor: vendor.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyProfile {
    pub pillar: Option<Tag>,
    pub family: Option<Tag>,
    pub format: Option<Tag>,
    pub uses: Vec<Tag>,
    pub default_material: Vec<Tag>,
    pub style_override: Vec<Tag>,
}

impl TaxonomyProfile {
    /// Pillar and family both set.
    pub fn is_complete(&self) -> bool {
        self.pillar.is_some() && self.family.is_some()
    }
}

/// Which resolution step produced the final profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    TypeTable,
    ContentInferred,
    ContentOverride,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Tagged(TagList),
    NotApplicable,
}

impl Classification {
    pub fn tags(&self) -> Option<&TagList> {
        match self {
            Classification::Tagged(tags) => Some(tags),
            Classification::NotApplicable => None,
        }
    }
}

/// One CSV row, cells in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub values: Vec<String>,
}

impl Record {
    pub fn get(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, index: usize, value: String) {
        if index >= self.values.len() {
            self.values.resize(index + 1, String::new());
        }
        self.values[index] = value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSheet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl CatalogSheet {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaggingStats {
    pub products_tagged: usize,
    pub not_applicable: usize,
    pub variants_cleared: usize,
    pub passthrough: usize,
    pub tiers: BTreeMap<ResolutionTier, usize>,
}

/// Tags written for one product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTags {
    pub handle: String,
    pub tier: ResolutionTier,
    pub tags: TagList,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub sheet: CatalogSheet,
    pub stats: TaggingStats,
    pub products: Vec<ProductTags>,
}
