//! Final normalization, scope merge and ranking

use super::GenreTags;
use crate::scope::Scope;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Score bonus for loved tags
pub const LOVE_BONUS: f64 = 2.0;

/// Score penalty for hated tags
pub const HATE_PENALTY: f64 = 0.5;

/// Tags listed per scope in the summary log line
const SUMMARY_LEN: usize = 10;

/// One entry of the final list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTag {
    /// Display name
    pub name: String,
    /// Merged score across scopes
    pub score: f64,
}

impl GenreTags {
    /// Final tag names, best first
    pub fn get(&mut self, various: bool) -> Vec<String> {
        self.ranked(various).into_iter().map(|tag| tag.name).collect()
    }

    /// Final tags with their merged scores, best first
    ///
    /// **Algorithm:**
    /// 1. Normalize each scope so its best tag scores 1.0 (in place)
    /// 2. Weight artist tags by the various-artists or artist multiplier,
    ///    album tags by 1
    /// 3. Double loved tags, halve hated ones (love wins if both match)
    /// 4. Sum per tag across scopes, format names, sort by score
    ///
    /// Equal scores are ordered by display name.
    pub fn ranked(&mut self, various: bool) -> Vec<RankedTag> {
        for scope in Scope::ALL {
            self.tags.normalize(scope);
            self.log_summary(scope);
        }

        let mut merged: BTreeMap<String, f64> = BTreeMap::new();
        for scope in Scope::ALL {
            let multiplier = self.scope_multiplier(scope, various);
            for (tag, score) in self.tags.get(scope) {
                let bias = if self.rules.is_loved(tag) {
                    LOVE_BONUS
                } else if self.rules.is_hated(tag) {
                    HATE_PENALTY
                } else {
                    1.0
                };
                *merged.entry(tag.clone()).or_insert(0.0) += score * bias * multiplier;
            }
        }

        let mut formatted: BTreeMap<String, f64> = BTreeMap::new();
        for (tag, score) in merged {
            *formatted.entry(self.format(&tag)).or_insert(0.0) += score;
        }

        let mut ranked: Vec<RankedTag> = formatted
            .into_iter()
            .map(|(name, score)| RankedTag { name, score })
            .collect();
        // Stable sort keeps name order among equal scores
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    fn scope_multiplier(&self, scope: Scope, various: bool) -> f64 {
        match scope {
            Scope::Artist if various => self.scores.various,
            Scope::Artist => self.scores.artist,
            Scope::Album => 1.0,
        }
    }

    fn log_summary(&self, scope: Scope) {
        let tags = self.tags.get(scope);
        if tags.is_empty() {
            return;
        }

        let summary = summary_order(tags)
            .into_iter()
            .take(SUMMARY_LEN)
            .map(|(tag, score)| format!("{} ({:.2})", self.format(tag), score))
            .collect::<Vec<_>>()
            .join(", ");

        info!("Best {:>6} tags ({}): {}", scope.as_str(), tags.len(), summary);
    }
}

/// Scope entries by score, then name, both descending
fn summary_order(tags: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut best: Vec<(&str, f64)> = tags.iter().map(|(tag, score)| (tag.as_str(), *score)).collect();
    best.sort_by(|a, b| b.1.total_cmp(&a.1).then(b.0.cmp(a.0)));
    best
}
