//! Per-scope score accumulation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Granularity a batch of tags applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Tags describing the artist as a whole
    Artist,
    /// Tags describing this one release
    Album,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Artist, Scope::Album];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Artist => "artist",
            Scope::Album => "album",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag name → accumulated score, one map per scope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeTagSet {
    artist: BTreeMap<String, f64>,
    album: BTreeMap<String, f64>,
}

impl ScopeTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scope: Scope) -> &BTreeMap<String, f64> {
        match scope {
            Scope::Artist => &self.artist,
            Scope::Album => &self.album,
        }
    }

    fn get_mut(&mut self, scope: Scope) -> &mut BTreeMap<String, f64> {
        match scope {
            Scope::Artist => &mut self.artist,
            Scope::Album => &mut self.album,
        }
    }

    /// Add score to a tag; non-positive or non-finite scores are ignored
    pub fn add(&mut self, scope: Scope, name: &str, score: f64) {
        if !(score.is_finite() && score > 0.0) {
            return;
        }
        *self.get_mut(scope).entry(name.to_string()).or_insert(0.0) += score;
    }

    /// Every tag name present in either scope
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.artist.keys().chain(self.album.keys()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.artist.is_empty() && self.album.is_empty()
    }

    /// Scale a scope so its strongest tag scores 1.0
    ///
    /// The maximum is taken once, before any score changes.
    pub fn normalize(&mut self, scope: Scope) {
        let tags = self.get_mut(scope);
        let max = tags.values().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return;
        }
        for score in tags.values_mut() {
            *score /= max;
        }
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.artist.clear();
        self.album.clear();
    }
}
