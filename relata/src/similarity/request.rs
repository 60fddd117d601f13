//! Similarity requests parsed from host input
//!
//! Hosts usually hand over loosely typed arguments (decoded JSON, template
//! parameters). A request accepts them permissively: unknown keys are
//! ignored and malformed values fall back to their defaults, so a bad request
//! yields an empty result instead of an error.

use serde::{Deserialize, Deserializer};

use super::options::SimilarOptions;
use super::taxonomy::TaxonomySpec;
use crate::models::{ContentType, ItemId};

/// Arguments of one similarity computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityRequest {
    /// Source item; `None` when missing or invalid
    pub item_id: Option<ItemId>,

    /// Candidate content types; empty means the source's own type
    pub content_types: Vec<ContentType>,

    /// Weighted taxonomies to score on
    pub taxonomies: TaxonomySpec,

    pub options: SimilarOptions,
}

impl SimilarityRequest {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id: Some(item_id),
            ..Self::default()
        }
    }

    pub fn with_content_types<I, T>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ContentType>,
    {
        self.content_types = content_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_taxonomies(mut self, taxonomies: TaxonomySpec) -> Self {
        self.taxonomies = taxonomies;
        self
    }

    pub fn with_options(mut self, options: SimilarOptions) -> Self {
        self.options = options;
        self
    }

    /// Read a request from a JSON object.
    ///
    /// Recognized keys: `item_id` (or `post_id`, `id`), `content_types` (or
    /// `post_types`), `taxonomies` and `options`.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let first = |keys: &[&str]| keys.iter().find_map(|key| map.get(*key));

        let item_id = first(&["item_id", "post_id", "id"]).and_then(ItemId::parse);

        let content_types = match first(&["content_types", "post_types"]) {
            Some(serde_json::Value::Array(types)) => types
                .iter()
                .filter_map(|t| t.as_str())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ContentType::from)
                .collect(),
            _ => Vec::new(),
        };

        let taxonomies = map
            .get("taxonomies")
            .and_then(|spec| TaxonomySpec::deserialize(spec).ok())
            .unwrap_or_default();

        let options = map
            .get("options")
            .map(SimilarOptions::from_value)
            .unwrap_or_default();

        Self {
            item_id,
            content_types,
            taxonomies,
            options,
        }
    }
}

impl<'de> Deserialize<'de> for SimilarityRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
