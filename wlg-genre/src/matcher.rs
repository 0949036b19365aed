//! Fuzzy tag matching
//!
//! Near-duplicate spellings ("post rock", "post-rock", "postrock") emitted
//! by different sources must accumulate under one key. Candidates are scored
//! with the Ratcliff/Obershelp gestalt ratio:
//!
//! ```text
//! ratio = 2 * M / (len(a) + len(b))
//! ```
//!
//! where `M` is the total length of the longest common block, found
//! recursively to its left and right.
//!
//! The acceptance threshold merges punctuation and spacing variants but
//! keeps short distinct genres ("rap" / "trap") apart.

/// Minimum ratio for a candidate to replace the tag name
pub const MATCH_THRESHOLD: f64 = 0.8572;

/// Gestalt similarity of two strings, in `[0, 1]`
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a.as_bytes(), b.as_bytes()) as f64 / total as f64
}

/// Best candidate at or above `threshold`
///
/// The highest ratio wins; equal ratios go to the lexicographically greatest
/// candidate so the result does not depend on candidate order.
pub fn best_match<'a, I>(name: &str, candidates: I, threshold: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let b = name.as_bytes();
    let mut best: Option<(f64, &'a str)> = None;

    for candidate in candidates {
        let a = candidate.as_bytes();
        let total = a.len() + b.len();
        if total == 0 {
            continue;
        }
        // Cheap upper bounds before the full block search
        if upper_bound(a.len().min(b.len()), total) < threshold {
            continue;
        }
        if upper_bound(common_multiset(a, b), total) < threshold {
            continue;
        }

        let ratio = upper_bound(matching_chars(a, b), total);
        if ratio < threshold {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_ratio, best_name)) => {
                ratio > best_ratio || (ratio == best_ratio && candidate > best_name)
            }
        };
        if better {
            best = Some((ratio, candidate));
        }
    }

    best.map(|(_, candidate)| candidate)
}

fn upper_bound(matches: usize, total: usize) -> f64 {
    2.0 * matches as f64 / total as f64
}

/// Characters the two strings share, ignoring order
fn common_multiset(a: &[u8], b: &[u8]) -> usize {
    let mut counts = [0usize; 256];
    for &c in b {
        counts[c as usize] += 1;
    }
    let mut matches = 0;
    for &c in a {
        let slot = &mut counts[c as usize];
        if *slot > 0 {
            *slot -= 1;
            matches += 1;
        }
    }
    matches
}

/// Total size of the recursively found longest common blocks
fn matching_chars(a: &[u8], b: &[u8]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_block(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
/// Returns `(start_a, start_b, len)`.
fn longest_block(
    a: &[u8],
    b: &[u8],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run[j + 1] = length of the common run ending at a[i - 1], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j] + 1;
                cur[j + 1] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            } else {
                cur[j + 1] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(similarity("ambient", "ambient"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_gestalt_ratio_values() {
        // "post" + "rock" out of 9 + 8 chars
        assert!((similarity("post-rock", "postrock") - 16.0 / 17.0).abs() < 1e-12);
        // "rap" inside "trap"
        assert!((similarity("rap", "trap") - 6.0 / 7.0).abs() < 1e-12);
        // classic example: "abcd" vs "bcde" shares "bcd"
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_blocks_are_not_lcs() {
        // The longest block "ab" anchors the match; the trailing "c" of
        // "cab" cannot pair with anything left of it.
        assert!((similarity("abc", "cab") - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_separates_short_genres() {
        assert!(similarity("rap", "trap") < MATCH_THRESHOLD);
        assert!(similarity("post rock", "post-rock") >= MATCH_THRESHOLD);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let pool = ["post-rock", "post-punk", "rock"];
        assert_eq!(best_match("post rock", pool, MATCH_THRESHOLD), Some("post-rock"));
        assert_eq!(best_match("jazz", pool, MATCH_THRESHOLD), None);
    }

    #[test]
    fn test_best_match_tie_goes_to_greatest() {
        // Both candidates differ from the query by one character
        let pool = ["abcdefgx", "abcdefgy"];
        assert_eq!(best_match("abcdefgz", pool, 0.8), Some("abcdefgy"));
        let reversed = ["abcdefgy", "abcdefgx"];
        assert_eq!(best_match("abcdefgz", reversed, 0.8), Some("abcdefgy"));
    }

    #[test]
    fn test_exact_match_wins() {
        let pool = ["synthpop", "synth-pop"];
        assert_eq!(best_match("synthpop", pool, MATCH_THRESHOLD), Some("synthpop"));
    }
}
