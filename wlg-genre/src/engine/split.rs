//! Compound tag decomposition
//!
//! Compound tags hand their score to their parts, which re-enter the full
//! pipeline. What the compound keeps for itself:
//!
//! | Tag shape                               | Parts get    | Compound keeps     |
//! |-----------------------------------------|--------------|--------------------|
//! | matches `dontsplit`                     | nothing      | `score`            |
//! | contains `&`                            | full `score` | nothing            |
//! | two clean words ("dark ambient")        | full `score` | `score * splitup`  |
//! | a word was filtered ("uk garage")       | full `score` | nothing            |
//! | three or more words                     | full `score` | nothing            |
//! | single word                             | nothing      | `score`            |
//!
//! Word splits hand the score to every phrase formed by omitting exactly one
//! surviving word.

use super::{GenreTags, MAX_SPLIT_DEPTH};
use crate::scope::Scope;
use tracing::{debug, warn};
use wlg_common::config::AmpersandSplit;

impl GenreTags {
    /// Dispatch parts of `name` and return the score `name` keeps
    pub(super) fn split(&mut self, scope: Scope, name: &str, score: f64, depth: usize) -> Option<f64> {
        if self.rules.is_dont_split(name) {
            return Some(score);
        }
        if depth >= MAX_SPLIT_DEPTH {
            warn!(tag = %name, depth, "Split depth limit reached, keeping tag whole");
            return Some(score);
        }

        if name.contains('&') {
            let parts: Vec<&str> = match self.ampersand_split {
                AmpersandSplit::All => name.split('&').collect(),
                AmpersandSplit::FirstOnly => name.split('&').take(1).collect(),
            };
            for part in parts {
                if !self.is_filtered(part) {
                    self.add(scope, part, score, depth + 1);
                }
            }
            debug!(tag = %name, "Split on '&'");
            return None;
        }

        if name.contains(' ') {
            let words: Vec<&str> = name.split(' ').collect();
            let parts: Vec<&str> = words
                .iter()
                .copied()
                .filter(|word| !self.is_filtered(word))
                .collect();

            let size = parts.len().saturating_sub(1).max(1);
            let mut split_up = false;
            for phrase in combinations(&parts, size) {
                split_up = true;
                self.add(scope, &phrase.join(" "), score, depth + 1);
            }

            if words.len() > 2 || parts.len() != words.len() {
                debug!(tag = %name, "Split into parts, compound dropped");
                return None;
            }
            if split_up {
                return Some(score * self.scores.splitup);
            }
        }

        Some(score)
    }
}

/// All `size`-element subsequences of `items`, in lexicographic index order
fn combinations<'a>(items: &[&'a str], size: usize) -> Vec<Vec<&'a str>> {
    let n = items.len();
    if size > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        result.push(indices.iter().map(|&i| items[i]).collect());

        // Rightmost index that can still move right
        let Some(pos) = (0..size).rev().find(|&i| indices[i] != i + n - size) else {
            return result;
        };
        indices[pos] += 1;
        for i in pos + 1..size {
            indices[i] = indices[i - 1] + 1;
        }
    }
}
