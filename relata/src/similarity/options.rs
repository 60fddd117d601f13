//! Caller options controlling boosts and the shape of the result

use serde::{Deserialize, Deserializer};

/// Options for a similarity computation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarOptions {
    /// Points added to candidates written by the source's author
    pub same_author_boost: Option<f64>,

    /// Keep only the best `max_number` candidates, as bare ids
    pub max_number: Option<usize>,

    /// Return bare ids instead of scores
    pub return_ids: bool,
}

impl SimilarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the same-author boost; non-finite values disable it
    pub fn with_same_author_boost(mut self, boost: f64) -> Self {
        self.same_author_boost = boost.is_finite().then_some(boost);
        self
    }

    pub fn with_max_number(mut self, max_number: usize) -> Self {
        self.max_number = Some(max_number);
        self
    }

    pub fn with_return_ids(mut self, return_ids: bool) -> Self {
        self.return_ids = return_ids;
        self
    }

    /// The boost to apply, if any
    pub fn author_boost(&self) -> Option<f64> {
        self.same_author_boost.filter(|boost| boost.is_finite())
    }

    /// Whether the result is a bare id list
    pub fn returns_ids(&self) -> bool {
        self.max_number.is_some() || self.return_ids
    }

    /// Read options from loosely typed host input.
    ///
    /// Unknown keys are ignored and invalid values count as absent.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            same_author_boost: map.get("same_author_boost").and_then(lenient_f64),
            max_number: map.get("max_number").and_then(lenient_usize),
            return_ids: map.get("return_ids").is_some_and(lenient_bool),
        }
    }
}

impl<'de> Deserialize<'de> for SimilarOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Finite number from a JSON number or numeric string
pub(crate) fn lenient_f64(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Non-negative count; fractional values are truncated
pub(crate) fn lenient_usize(value: &serde_json::Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    lenient_f64(value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.trunc() as usize)
}

/// Truthiness of a flag: booleans, non-zero numbers, and non-empty strings
/// other than `"0"` and `"false"`
pub(crate) fn lenient_bool(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false")
        }
        _ => false,
    }
}
