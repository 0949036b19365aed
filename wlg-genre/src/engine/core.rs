//! Engine construction and the per-tag pipeline

use super::GenreTags;
use crate::album_filter::build_album_filter;
use crate::error::{Error, Result};
use crate::input::TagInput;
use crate::matcher::{best_match, MATCH_THRESHOLD};
use crate::metadata::ReleaseMetadata;
use crate::rules::RuleTable;
use crate::scope::{Scope, ScopeTagSet};
use std::collections::BTreeMap;
use tracing::debug;
use wlg_common::config::GenreConfig;

impl GenreTags {
    /// Create an engine with the built-in rule resource
    ///
    /// # Errors
    /// Any configuration or rule problem is fatal here; the engine is never
    /// built from partial rules.
    pub fn new(config: &GenreConfig) -> Result<Self> {
        config.validate()?;
        let rules = RuleTable::builtin(&config.genres)?;
        Ok(Self::with_rules(config, rules))
    }

    /// Create an engine with an already compiled rule table
    pub fn with_rules(config: &GenreConfig, rules: RuleTable) -> Self {
        Self {
            rules,
            scores: config.scores.clone(),
            ampersand_split: config.genres.ampersand_split,
            ranked_policy: config.genres.ranked_policy,
            tags: ScopeTagSet::new(),
        }
    }

    /// Start a new release
    ///
    /// Discards all accumulated scores and rebuilds the album filter from
    /// the release's own artist and album names.
    pub fn reset(&mut self, release: &dyn ReleaseMetadata) {
        self.tags.clear();
        let album_filter = build_album_filter(release);
        self.rules.filter_mut().set_album_filter(album_filter);
    }

    /// Add one source's tags to a scope
    ///
    /// Empty batches are ignored.
    ///
    /// # Errors
    /// [`Error::UnknownSource`] if `source` has no configured multiplier.
    pub fn add_tags(&mut self, tags: impl Into<TagInput>, source: &str, scope: Scope) -> Result<()> {
        let tags = tags.into();
        if tags.is_empty() {
            return Ok(());
        }

        let multiplier = self
            .scores
            .source_multiplier(source)
            .ok_or_else(|| Error::UnknownSource(source.to_string()))?;

        debug!(source, scope = %scope, count = tags.len(), multiplier, "Adding tags");

        for (name, score) in tags.into_scored(multiplier, self.ranked_policy) {
            self.add(scope, &name, score, 0);
        }
        Ok(())
    }

    /// Accumulated scores of a scope
    ///
    /// After [`GenreTags::get`] these are the normalized values.
    pub fn tags(&self, scope: Scope) -> &BTreeMap<String, f64> {
        self.tags.get(scope)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Display form of a tag name
    pub fn format(&self, name: &str) -> String {
        self.rules.formatter().format(name)
    }

    /// Filter → replace → filter → match → split → accumulate
    pub(super) fn add(&mut self, scope: Scope, name: &str, score: f64, depth: usize) {
        let name = to_ascii_lower(name);
        if !(score.is_finite() && score > 0.0) || self.is_filtered(&name) {
            return;
        }

        let name = self.rules.replacer().replace(&name);
        if self.is_filtered(&name) {
            return;
        }

        let name = self.canonicalize(&name);
        if self.is_filtered(&name) {
            debug!(tag = %name, "Canonical name is blacklisted");
            return;
        }

        let Some(score) = self.split(scope, &name, score, depth) else {
            return;
        };
        self.tags.add(scope, &name, score);
    }

    pub(super) fn is_filtered(&self, name: &str) -> bool {
        self.rules.filter().is_filtered(name)
    }

    /// Spelling already known to this release or the seed vocabulary
    fn canonicalize(&self, name: &str) -> String {
        let pool = self
            .tags
            .names()
            .chain(self.rules.seed_vocabulary().iter().map(String::as_str));

        match best_match(name, pool, MATCH_THRESHOLD) {
            Some(matched) if matched != name => {
                debug!(tag = %name, canonical = %matched, "Merged near-duplicate tag");
                matched.to_string()
            }
            _ => name.to_string(),
        }
    }
}

/// Drop non-ASCII characters and lowercase the rest
fn to_ascii_lower(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ascii_lower() {
        assert_eq!(to_ascii_lower("Électro Pop"), "lectro pop");
        assert_eq!(to_ascii_lower("K-POP"), "k-pop");
    }
}
