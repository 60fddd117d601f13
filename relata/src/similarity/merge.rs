//! Padding a similar-items list with a fallback list

use std::collections::HashSet;

use crate::models::ItemId;

/// Concatenate `primary` and `secondary`, dropping duplicates and keeping the
/// first occurrence of each id, up to `max` ids when given.
///
/// Hosts use this to fill up a short list of similar items with, for example,
/// the latest items of the same type.
pub fn merge_results(primary: &[ItemId], secondary: &[ItemId], max: Option<usize>) -> Vec<ItemId> {
    let limit = max.unwrap_or(usize::MAX);
    let mut seen = HashSet::new();

    primary
        .iter()
        .chain(secondary)
        .copied()
        .filter(|id| seen.insert(*id))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId::from).collect()
    }

    #[test]
    fn test_merge_keeps_primary_order_first() {
        let merged = merge_results(&ids(&[20, 21]), &ids(&[30, 20, 31]), None);
        assert_eq!(merged, ids(&[20, 21, 30, 31]));
    }

    #[test]
    fn test_merge_respects_max() {
        let merged = merge_results(&ids(&[20, 21]), &ids(&[30, 31]), Some(3));
        assert_eq!(merged, ids(&[20, 21, 30]));
        assert!(merge_results(&ids(&[1]), &ids(&[2]), Some(0)).is_empty());
    }

    #[test]
    fn test_merge_dedups_within_a_list() {
        let merged = merge_results(&ids(&[5, 5, 6]), &[], None);
        assert_eq!(merged, ids(&[5, 6]));
    }
}
