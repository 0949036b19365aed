//! Raw tag batches and their initial scoring
//!
//! Sources deliver tags in one of two shapes: with a weight per tag
//! (play counts, votes) or as a plain list. The shape is resolved once, at
//! the call boundary, into [`TagInput`].

use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use wlg_common::config::RankedPolicy;

/// Per-tag discount base for unweighted lists
pub const RANKED_DECAY: f64 = 0.85;

/// One source's tags for one scope
#[derive(Debug, Clone, PartialEq)]
pub enum TagInput {
    /// Tag name → raw weight, in delivery order
    Weighted(Vec<(String, f64)>),
    /// Tag names without weights, in delivery order
    Ranked(Vec<String>),
}

impl TagInput {
    pub fn is_empty(&self) -> bool {
        match self {
            TagInput::Weighted(tags) => tags.is_empty(),
            TagInput::Ranked(tags) => tags.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TagInput::Weighted(tags) => tags.len(),
            TagInput::Ranked(tags) => tags.len(),
        }
    }

    /// Initial score of every tag, before filtering
    ///
    /// **Weighted:** `multiplier * weight / max_weight`, so the source's
    /// strongest tag gets the full multiplier.
    ///
    /// **Ranked:** depends on `policy`:
    /// - [`RankedPolicy::Flat`]: every tag gets `multiplier * 0.85^(n - 1)`
    /// - [`RankedPolicy::RankDecay`]: tag `i` gets `multiplier * 0.85^i`
    pub fn into_scored(self, multiplier: f64, policy: RankedPolicy) -> Vec<(String, f64)> {
        match self {
            TagInput::Weighted(tags) => {
                let max = tags
                    .iter()
                    .map(|(_, weight)| *weight)
                    .filter(|weight| weight.is_finite())
                    .fold(f64::NEG_INFINITY, f64::max);
                if max <= 0.0 {
                    debug!(count = tags.len(), "No positive weight in batch, ignored");
                    return Vec::new();
                }
                tags.into_iter()
                    .filter(|(_, weight)| weight.is_finite())
                    .map(|(name, weight)| (name, multiplier * weight / max))
                    .collect()
            }
            TagInput::Ranked(tags) => {
                let count = tags.len();
                tags.into_iter()
                    .enumerate()
                    .map(|(rank, name)| {
                        let exponent = match policy {
                            RankedPolicy::Flat => count.saturating_sub(1),
                            RankedPolicy::RankDecay => rank,
                        };
                        (name, multiplier * RANKED_DECAY.powi(exponent as i32))
                    })
                    .collect()
            }
        }
    }
}

impl From<Vec<(String, f64)>> for TagInput {
    fn from(tags: Vec<(String, f64)>) -> Self {
        TagInput::Weighted(tags)
    }
}

impl From<Vec<(&str, f64)>> for TagInput {
    fn from(tags: Vec<(&str, f64)>) -> Self {
        TagInput::Weighted(tags.into_iter().map(|(n, w)| (n.to_string(), w)).collect())
    }
}

impl From<BTreeMap<String, f64>> for TagInput {
    fn from(tags: BTreeMap<String, f64>) -> Self {
        TagInput::Weighted(tags.into_iter().collect())
    }
}

/// Hash maps have no stable order; tags are taken sorted by name
impl From<HashMap<String, f64>> for TagInput {
    fn from(tags: HashMap<String, f64>) -> Self {
        let mut tags: Vec<(String, f64)> = tags.into_iter().collect();
        tags.sort_by(|a, b| a.0.cmp(&b.0));
        TagInput::Weighted(tags)
    }
}

impl From<Vec<String>> for TagInput {
    fn from(tags: Vec<String>) -> Self {
        TagInput::Ranked(tags)
    }
}

impl From<Vec<&str>> for TagInput {
    fn from(tags: Vec<&str>) -> Self {
        TagInput::Ranked(tags.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_relative_to_max() {
        let input = TagInput::from(vec![("rock", 10.0), ("pop", 5.0)]);
        let scored = input.into_scored(1.0, RankedPolicy::Flat);
        assert_eq!(scored, vec![("rock".to_string(), 1.0), ("pop".to_string(), 0.5)]);
    }

    #[test]
    fn test_weighted_applies_multiplier() {
        let input = TagInput::from(vec![("rock", 4.0), ("pop", 1.0)]);
        let scored = input.into_scored(2.0, RankedPolicy::Flat);
        assert_eq!(scored[0].1, 2.0);
        assert_eq!(scored[1].1, 0.5);
    }

    #[test]
    fn test_weighted_without_positive_weight_is_empty() {
        let input = TagInput::from(vec![("rock", 0.0), ("pop", 0.0)]);
        assert!(input.into_scored(1.0, RankedPolicy::Flat).is_empty());
    }

    #[test]
    fn test_ranked_flat_discount() {
        let input = TagInput::from(vec!["ambient", "drone", "ambient"]);
        let scored = input.into_scored(1.0, RankedPolicy::Flat);
        assert_eq!(scored.len(), 3);
        for (_, score) in scored {
            assert!((score - 0.7225).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ranked_single_tag_undiscounted() {
        let scored = TagInput::from(vec!["ambient"]).into_scored(0.66, RankedPolicy::Flat);
        assert_eq!(scored[0].1, 0.66);
    }

    #[test]
    fn test_ranked_rank_decay() {
        let input = TagInput::from(vec!["a", "b", "c"]);
        let scored = input.into_scored(1.0, RankedPolicy::RankDecay);
        assert_eq!(scored[0].1, 1.0);
        assert!((scored[1].1 - 0.85).abs() < 1e-12);
        assert!((scored[2].1 - 0.7225).abs() < 1e-12);
    }

    #[test]
    fn test_hash_map_sorted_by_name() {
        let mut map = HashMap::new();
        map.insert("techno".to_string(), 1.0);
        map.insert("acid".to_string(), 2.0);
        match TagInput::from(map) {
            TagInput::Weighted(tags) => {
                assert_eq!(tags[0].0, "acid");
                assert_eq!(tags[1].0, "techno");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
