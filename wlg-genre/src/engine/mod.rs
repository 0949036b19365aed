//! Genre tag engine
//!
//! Owns the rule table and the per-scope accumulators for exactly one
//! release at a time.
//!
//! **Lifecycle:**
//! 1. [`GenreTags::new`] once per run (compiles the rule table)
//! 2. [`GenreTags::reset`] once per release (clears scores, rebuilds the
//!    album filter from the release's metadata)
//! 3. [`GenreTags::add_tags`] once per (source, scope) batch
//! 4. [`GenreTags::get`] once, for the final ranked list
//!
//! Every mutating call takes `&mut self`, so one instance can never be fed
//! two releases concurrently. Use one engine per worker, or one engine
//! strictly sequentially with a reset in between.

mod core;
mod merge;
mod split;

pub use merge::RankedTag;

use crate::rules::RuleTable;
use crate::scope::ScopeTagSet;
use wlg_common::config::{AmpersandSplit, RankedPolicy, ScoresConfig};

/// Maximum nesting of split → add → split
///
/// A sub-phrase can fuzzy-match back onto a longer phrase; past this depth a
/// tag keeps its score instead of being decomposed again.
pub const MAX_SPLIT_DEPTH: usize = 8;

/// Normalizes, merges and ranks genre tags of one release
#[derive(Debug, Clone)]
pub struct GenreTags {
    rules: RuleTable,
    scores: ScoresConfig,
    ampersand_split: AmpersandSplit,
    ranked_policy: RankedPolicy,
    tags: ScopeTagSet,
}
