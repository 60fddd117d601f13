//! Score accumulation and ranked results

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;

use super::options::SimilarOptions;
use crate::models::ItemId;

/// A candidate with its accumulated score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredItem {
    pub id: ItemId,
    pub score: f64,
}

/// Running scores of the candidates of one computation.
///
/// Remembers the order in which candidates first appeared; that order breaks
/// ties in [`ScoreTable::into_ranked`].
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    order: Vec<ItemId>,
    scores: HashMap<ItemId, f64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.scores.contains_key(&id)
    }

    pub fn score(&self, id: ItemId) -> Option<f64> {
        self.scores.get(&id).copied()
    }

    /// Start tracking `id` at `base`; returns false if it is already tracked
    pub fn insert(&mut self, id: ItemId, base: f64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.order.push(id);
        self.scores.insert(id, base);
        true
    }

    /// Add points to a tracked candidate; untracked ids are left out
    pub fn add(&mut self, id: ItemId, points: f64) -> bool {
        match self.scores.get_mut(&id) {
            Some(score) => {
                *score += points;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Candidates by descending score, ties in first-appearance order
    pub fn into_ranked(self) -> Vec<ScoredItem> {
        let mut ranked: Vec<ScoredItem> = self
            .order
            .into_iter()
            .map(|id| ScoredItem {
                id,
                score: self.scores.get(&id).copied().unwrap_or_default(),
            })
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

/// Result of a similarity computation
///
/// Serializes as an ordered `{id: score}` map or as an id list.
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarItems {
    /// Full ranking with scores
    Scored(Vec<ScoredItem>),
    /// Ranked ids only
    Ids(Vec<ItemId>),
}

impl SimilarItems {
    /// Empty result in the shape requested by `options`
    pub fn empty(options: &SimilarOptions) -> Self {
        if options.returns_ids() {
            SimilarItems::Ids(Vec::new())
        } else {
            SimilarItems::Scored(Vec::new())
        }
    }

    /// Project a ranking according to `options`
    pub fn project(ranked: Vec<ScoredItem>, options: &SimilarOptions) -> Self {
        if let Some(max_number) = options.max_number {
            SimilarItems::Ids(ranked.into_iter().take(max_number).map(|item| item.id).collect())
        } else if options.return_ids {
            SimilarItems::Ids(ranked.into_iter().map(|item| item.id).collect())
        } else {
            SimilarItems::Scored(ranked)
        }
    }

    /// Ranked ids, whatever the shape
    pub fn ids(&self) -> Vec<ItemId> {
        match self {
            SimilarItems::Scored(items) => items.iter().map(|item| item.id).collect(),
            SimilarItems::Ids(ids) => ids.clone(),
        }
    }

    /// Score of `id`, only available in the scored shape
    pub fn score_of(&self, id: ItemId) -> Option<f64> {
        match self {
            SimilarItems::Scored(items) => items.iter().find(|item| item.id == id).map(|item| item.score),
            SimilarItems::Ids(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SimilarItems::Scored(items) => items.len(),
            SimilarItems::Ids(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for SimilarItems {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SimilarItems::Scored(items) => {
                let mut map = serializer.serialize_map(Some(items.len()))?;
                for item in items {
                    map.serialize_entry(&item.id, &item.score)?;
                }
                map.end()
            }
            SimilarItems::Ids(ids) => ids.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ItemId {
        ItemId::from(raw)
    }

    fn table() -> ScoreTable {
        let mut table = ScoreTable::new();
        for (raw, points) in [(5, 1.0), (3, 2.0), (9, 1.0), (7, 2.0)] {
            table.insert(id(raw), 0.0);
            table.add(id(raw), points);
        }
        table
    }

    #[test]
    fn test_insert_only_once() {
        let mut table = ScoreTable::new();
        assert!(table.insert(id(1), 0.5));
        assert!(!table.insert(id(1), 9.0));
        assert_eq!(table.score(id(1)), Some(0.5));
        assert!(!table.add(id(2), 1.0));
        assert!(!table.contains(id(2)));
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let ranked: Vec<u64> = table().into_ranked().iter().map(|item| item.id.get()).collect();
        assert_eq!(ranked, vec![3, 7, 5, 9]);
    }

    #[test]
    fn test_projection_shapes() {
        let ranked = table().into_ranked();

        let scored = SimilarItems::project(ranked.clone(), &SimilarOptions::new());
        assert_eq!(scored.len(), 4);
        assert_eq!(scored.score_of(id(3)), Some(2.0));

        let ids = SimilarItems::project(ranked.clone(), &SimilarOptions::new().with_return_ids(true));
        assert_eq!(ids, SimilarItems::Ids(vec![id(3), id(7), id(5), id(9)]));

        // max_number wins over return_ids=false
        let top = SimilarItems::project(ranked.clone(), &SimilarOptions::new().with_max_number(2));
        assert_eq!(top, SimilarItems::Ids(vec![id(3), id(7)]));

        let none = SimilarItems::project(ranked, &SimilarOptions::new().with_max_number(0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_serialization_keeps_rank_order() {
        let ranked = table().into_ranked();
        let scored = SimilarItems::project(ranked.clone(), &SimilarOptions::new());
        assert_eq!(
            serde_json::to_string(&scored).unwrap(),
            r#"{"3":2.0,"7":2.0,"5":1.0,"9":1.0}"#
        );

        let ids = SimilarItems::project(ranked, &SimilarOptions::new().with_return_ids(true));
        assert_eq!(serde_json::to_string(&ids).unwrap(), "[3,7,5,9]");
    }

    #[test]
    fn test_empty_shape_follows_options() {
        assert_eq!(
            SimilarItems::empty(&SimilarOptions::new()),
            SimilarItems::Scored(Vec::new())
        );
        assert_eq!(
            SimilarItems::empty(&SimilarOptions::new().with_max_number(3)),
            SimilarItems::Ids(Vec::new())
        );
    }
}
