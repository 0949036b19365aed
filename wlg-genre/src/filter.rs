//! Tag filter
//!
//! Decides whether a candidate tag name is rejected outright. A name is
//! rejected when it is too short or too long, when it contains an echo of
//! the current release's own artist/album (see [`crate::album_filter`]), or
//! when it matches the static blacklist as a whole.

use crate::error::Result;
use crate::rules::compile_whole_match;
use regex::Regex;

/// Shortest accepted tag name
pub const MIN_TAG_LEN: usize = 3;

/// Longest accepted tag name
pub const MAX_TAG_LEN: usize = 19;

/// Maximum alternatives compiled into one blacklist expression
pub const BLACKLIST_CHUNK_SIZE: usize = 256;

/// Static blacklist plus the per-release album filter
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    /// Anchored, case-insensitive chunks; any match rejects
    blacklist: Vec<Regex>,

    /// Unanchored release echo filter, rebuilt on every reset
    album: Option<Regex>,
}

impl TagFilter {
    /// Compile blacklist patterns in chunks of [`BLACKLIST_CHUNK_SIZE`]
    pub fn new(patterns: &[String]) -> Result<Self> {
        let blacklist = patterns
            .chunks(BLACKLIST_CHUNK_SIZE)
            .filter_map(|chunk| compile_whole_match(chunk).transpose())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            blacklist,
            album: None,
        })
    }

    /// Replace the per-release filter
    pub fn set_album_filter(&mut self, album: Option<Regex>) {
        self.album = album;
    }

    /// Current per-release filter, if any
    pub fn album_filter(&self) -> Option<&Regex> {
        self.album.as_ref()
    }

    /// Number of compiled blacklist chunks
    pub fn chunk_count(&self) -> usize {
        self.blacklist.len()
    }

    /// True if the tag name must be dropped
    pub fn is_filtered(&self, name: &str) -> bool {
        let len = name.len();
        if !(MIN_TAG_LEN..=MAX_TAG_LEN).contains(&len) {
            return true;
        }
        if self.album.as_ref().is_some_and(|re| re.is_match(name)) {
            return true;
        }
        self.blacklist.iter().any(|re| re.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::album_filter::build_album_filter;
    use crate::metadata::Release;

    fn filter(patterns: &[&str]) -> TagFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        TagFilter::new(&patterns).unwrap()
    }

    #[test]
    fn test_length_bounds() {
        let f = filter(&[]);
        assert!(f.is_filtered(""));
        assert!(f.is_filtered("ab"));
        assert!(!f.is_filtered("abc"));
        assert!(!f.is_filtered("a".repeat(19).as_str()));
        assert!(f.is_filtered("a".repeat(20).as_str()));
    }

    #[test]
    fn test_blacklist_is_whole_string() {
        let f = filter(&["seen live", "favou?rite"]);
        assert!(f.is_filtered("seen live"));
        assert!(f.is_filtered("favorite"));
        assert!(f.is_filtered("Favourite"));
        assert!(!f.is_filtered("not seen live"));
        assert!(!f.is_filtered("favorites"));
    }

    #[test]
    fn test_fuzzy_entry_matches_substring() {
        let f = filter(&[".*favou?rite.*"]);
        assert!(f.is_filtered("my favorites"));
    }

    #[test]
    fn test_blacklist_chunking() {
        let patterns: Vec<String> = (0..600).map(|i| format!("tag{i:04}")).collect();
        let f = TagFilter::new(&patterns).unwrap();
        assert_eq!(f.chunk_count(), 3);
        assert!(f.is_filtered("tag0000"));
        assert!(f.is_filtered("tag0300"));
        assert!(f.is_filtered("tag0599"));
        assert!(!f.is_filtered("tag0600"));
    }

    #[test]
    fn test_album_filter_applies_until_replaced() {
        let mut f = filter(&[]);
        let release = Release::new(Some("Massive Attack"), Some("Mezzanine"));
        f.set_album_filter(build_album_filter(&release));
        assert!(f.is_filtered("mezzanine"));
        assert!(f.is_filtered("massive attack"));
        assert!(!f.is_filtered("trip-hop"));

        f.set_album_filter(None);
        assert!(!f.is_filtered("mezzanine"));
    }
}
