//! Taxonomy weighting specification
//!
//! Callers describe which taxonomies count towards similarity and how many
//! points a shared category in each is worth. The weighting is accepted in several
//! shapes, all normalizing to the same ordered list:
//!
//! ```json
//! "category"
//! ["category", "post_tag"]
//! {"category": {"points": 1}, "post_tag": {"points": 3}}
//! ["category", {"post_tag": {"points": 3}}]
//! ```

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use super::options::lenient_f64;

/// Points awarded for each shared category of a taxonomy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxonomyWeight {
    points: f64,
}

impl TaxonomyWeight {
    /// Default number of points
    pub const DEFAULT_POINTS: f64 = 1.0;

    /// Create a weight; non-finite values fall back to the default
    pub fn new(points: f64) -> Self {
        Self {
            points: if points.is_finite() {
                points
            } else {
                Self::DEFAULT_POINTS
            },
        }
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    /// Read a weight from loosely typed input.
    ///
    /// `{"points": n}`, a bare number, or a numeric string set the points;
    /// anything missing or unparseable yields the default.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let points = match value {
            serde_json::Value::Object(map) => map.get("points").and_then(lenient_f64),
            other => lenient_f64(other),
        };
        Self::new(points.unwrap_or(Self::DEFAULT_POINTS))
    }
}

impl Default for TaxonomyWeight {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POINTS)
    }
}

impl<'de> Deserialize<'de> for TaxonomyWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Ordered list of weighted taxonomies.
///
/// Iteration order is the order given by the caller and decides how ties are
/// broken in the final ranking. A taxonomy listed twice is scored twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonomySpec {
    entries: Vec<(String, TaxonomyWeight)>,
}

impl TaxonomySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Taxonomies worth one point each
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().collect()
    }

    /// Append a taxonomy worth `points`
    pub fn with(mut self, name: impl Into<String>, points: f64) -> Self {
        self.push(name, TaxonomyWeight::new(points));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, weight: TaxonomyWeight) {
        self.entries.push((name.into(), weight));
    }

    /// Taxonomy names with their points, in caller order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, weight)| (name.as_str(), weight.points()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the taxonomies named by one loosely typed list element.
    ///
    /// Names count one point, maps carry their own weights, and nested lists
    /// are flattened. Anything else names no taxonomy and is skipped.
    fn extend_from_value(&mut self, value: Value) {
        match value {
            Value::String(name) => self.push(name, TaxonomyWeight::default()),
            Value::Object(map) => {
                for (name, weight) in map {
                    self.push(name, TaxonomyWeight::from_value(&weight));
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.extend_from_value(item);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TaxonomySpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut spec = Self::new();
        for name in iter {
            spec.push(name, TaxonomyWeight::default());
        }
        spec
    }
}

struct SpecVisitor;

impl<'de> Visitor<'de> for SpecVisitor {
    type Value = TaxonomySpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a taxonomy name, a list of taxonomies, or a map of taxonomy weights")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::from_names([name]))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::new())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::new())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::new())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::new())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(TaxonomySpec::new())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut spec = TaxonomySpec::new();
        while let Some(entry) = seq.next_element::<Value>()? {
            spec.extend_from_value(entry);
        }
        Ok(spec)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut spec = TaxonomySpec::new();
        while let Some(key) = map.next_key::<Value>()? {
            let weight = map.next_value::<TaxonomyWeight>()?;
            // non-string keys cannot name a taxonomy
            if let Value::String(name) = key {
                spec.push(name, weight);
            }
        }
        Ok(spec)
    }
}

impl<'de> Deserialize<'de> for TaxonomySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SpecVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> TaxonomySpec {
        serde_json::from_value(value).unwrap()
    }

    fn entries(spec: &TaxonomySpec) -> Vec<(String, f64)> {
        spec.iter().map(|(name, points)| (name.to_string(), points)).collect()
    }

    #[test]
    fn test_list_and_unit_map_normalize_identically() {
        let list = parse(json!(["category", "post_tag"]));
        let map = parse(json!({"category": {"points": 1}, "post_tag": {}}));
        assert_eq!(list, map);
        assert_eq!(list, TaxonomySpec::from_names(["category", "post_tag"]));
    }

    #[test]
    fn test_single_name() {
        assert_eq!(
            entries(&parse(json!("category"))),
            vec![("category".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_mixed_list_keeps_order_and_weights() {
        let spec = parse(json!(["category", {"post_tag": {"points": 3}}, "brand"]));
        assert_eq!(
            entries(&spec),
            vec![
                ("category".to_string(), 1.0),
                ("post_tag".to_string(), 3.0),
                ("brand".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_map_keeps_caller_order() {
        let spec: TaxonomySpec =
            serde_json::from_str(r#"{"post_tag": {"points": 2}, "category": {"points": 1}}"#)
                .unwrap();
        assert_eq!(
            entries(&spec),
            vec![("post_tag".to_string(), 2.0), ("category".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_malformed_weights_default_to_one() {
        let spec = parse(json!({
            "a": {"points": "abc"},
            "b": {"weight": 4},
            "c": null,
            "d": {"points": "2.5"},
            "e": 0,
            "f": [1, 2]
        }));
        assert_eq!(
            entries(&spec),
            vec![
                ("a".to_string(), 1.0),
                ("b".to_string(), 1.0),
                ("c".to_string(), 1.0),
                ("d".to_string(), 2.5),
                ("e".to_string(), 0.0),
                ("f".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_list_skips_entries_that_name_no_taxonomy() {
        let spec = parse(json!(["category", 5, true, null, "post_tag"]));
        assert_eq!(spec, TaxonomySpec::from_names(["category", "post_tag"]));

        let nested = parse(json!([
            "category",
            [{"brand": {"points": 2}}, 7],
            {"post_tag": {"points": "x"}},
            [[false]]
        ]));
        assert_eq!(
            entries(&nested),
            vec![
                ("category".to_string(), 1.0),
                ("brand".to_string(), 2.0),
                ("post_tag".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_only_malformed_entries_give_empty_spec() {
        assert!(parse(json!([1, false, null])).is_empty());
        assert!(parse(json!(42)).is_empty());
        assert!(parse(json!(false)).is_empty());
    }

    #[test]
    fn test_null_is_empty() {
        assert!(parse(json!(null)).is_empty());
    }

    #[test]
    fn test_non_finite_weight_falls_back() {
        assert_eq!(TaxonomyWeight::new(f64::NAN).points(), 1.0);
        assert_eq!(TaxonomyWeight::new(f64::NEG_INFINITY).points(), 1.0);
        assert_eq!(TaxonomyWeight::new(-2.0).points(), -2.0);
    }
}
