//! Per-release album filter
//!
//! Sources regularly report the artist or album name as a genre tag. On
//! every reset the engine derives a blacklist from the release's own album
//! artist and album title and rejects any tag containing one of its tokens.
//!
//! **Algorithm:**
//! 1. Take the album artist, each of its words, and the album title
//! 2. Replace bracketed groups, dash/quote delimited parts, volume markers,
//!    "and"/"the" and every character that is not an ASCII letter with a
//!    `.*` wildcard
//! 3. Collapse repeated wildcards and trim them off both ends
//! 4. Keep tokens longer than two characters, lowercased
//! 5. Match any token anywhere in a tag, case-insensitive

use crate::metadata::ReleaseMetadata;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

const WILDCARD: &str = ".*";

/// Spans replaced by a wildcard, applied in order
static STRIP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\(.*\)",
        r"\[.*\]",
        r"\{.*\}",
        r"-.*-",
        r"'.*'",
        r#"".*""#,
        r"(?i)vol(\.|ume)? ",
        r"(?i) and ",
        r"(?i)the ",
        r"[^A-Za-z_]",
        r"(\.\*)+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid album filter regex"))
    .collect()
});

static EDGE_WILDCARDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\.\*)+|(\.\*)+$").expect("valid wildcard regex"));

/// Build the blacklist for one release
///
/// Returns `None` when the metadata yields no usable token, in which case
/// nothing is filtered.
pub fn build_album_filter(release: &dyn ReleaseMetadata) -> Option<Regex> {
    let mut tokens: Vec<String> = Vec::new();

    let mut values: Vec<&str> = Vec::new();
    if let Some(artist) = release.album_artist().filter(|v| !v.trim().is_empty()) {
        values.push(artist);
        if artist.contains(' ') {
            values.extend(artist.split(' '));
        }
    }
    if let Some(album) = release.album().filter(|v| !v.trim().is_empty()) {
        values.push(album);
    }

    for value in values {
        if let Some(token) = album_token(value) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }

    if tokens.is_empty() {
        debug!("No album filter tokens for this release");
        return None;
    }

    let pattern = format!("(?i)(?:{})", tokens.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => {
            debug!(tokens = ?tokens, "Built album filter");
            Some(re)
        }
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Album filter did not compile, disabled");
            None
        }
    }
}

/// Reduce one metadata value to a wildcard token
fn album_token(value: &str) -> Option<String> {
    let mut token = value.to_string();
    for re in STRIP_PATTERNS.iter() {
        token = re.replace_all(&token, WILDCARD).trim().to_string();
    }
    let token = EDGE_WILDCARDS.replace_all(&token, "").trim().to_lowercase();

    (token.len() > 2).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Release;

    #[test]
    fn test_token_strips_brackets_and_digits() {
        assert_eq!(album_token("Mezzanine (Deluxe Edition)").as_deref(), Some("mezzanine"));
        assert_eq!(album_token("Selected Ambient Works 85-92").as_deref(), Some("selected.*ambient.*works"));
        assert_eq!(album_token("Vol. 2").as_deref(), None);
    }

    #[test]
    fn test_token_replaces_articles() {
        assert_eq!(album_token("The Cure").as_deref(), Some("cure"));
        assert_eq!(album_token("Simon and Garfunkel").as_deref(), Some("simon.*garfunkel"));
    }

    #[test]
    fn test_short_tokens_dropped() {
        assert_eq!(album_token("XX"), None);
        assert_eq!(album_token("(live)"), None);
    }

    #[test]
    fn test_artist_words_become_tokens() {
        let release = Release::new(Some("Boards of Canada"), None);
        let re = build_album_filter(&release).unwrap();
        assert!(re.is_match("music from canada"));
        assert!(re.is_match("boards"));
        // "of" is too short to become a token
        assert!(!re.is_match("ofrenda"));
    }

    #[test]
    fn test_album_title_is_substring_match() {
        let release = Release::new(None, Some("Mezzanine"));
        let re = build_album_filter(&release).unwrap();
        assert!(re.is_match("mezzanine"));
        assert!(re.is_match("MEZZANINE classics"));
        assert!(!re.is_match("trip-hop"));
    }

    #[test]
    fn test_no_metadata_filters_nothing() {
        assert!(build_album_filter(&Release::default()).is_none());
        assert!(build_album_filter(&Release::new(Some(""), Some("12"))).is_none());
    }
}
