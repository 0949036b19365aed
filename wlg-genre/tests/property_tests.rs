//! Property tests for the genre tag pipeline
//!
//! Arbitrary tag batches must never break the stored-name alphabet, the
//! length bounds or per-scope normalization; display formatting must be
//! idempotent.

use proptest::prelude::*;
use regex::Regex;
use wlg_common::GenreConfig;
use wlg_genre::filter::{TagFilter, MAX_TAG_LEN, MIN_TAG_LEN};
use wlg_genre::format::Formatter;
use wlg_genre::{GenreTags, Release, Scope};

fn engine() -> GenreTags {
    let mut genres = GenreTags::new(&GenreConfig::default()).unwrap();
    genres.reset(&Release::default());
    genres
}

fn raw_tags() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(("[ -~]{0,30}", 0.0f64..100.0), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stored_names_are_clean_and_unfiltered(tags in raw_tags()) {
        let stored_name = Regex::new(r"^[a-z0-9&\- ]{3,19}$").unwrap();
        let mut genres = engine();
        genres.add_tags(tags, "discogs", Scope::Album).unwrap();

        for (name, score) in genres.tags(Scope::Album) {
            prop_assert!(stored_name.is_match(name), "bad name {:?}", name);
            prop_assert!(!genres.rules().filter().is_filtered(name), "{:?} is filtered", name);
            prop_assert!(*score > 0.0);
        }
    }

    #[test]
    fn scopes_normalized_after_get(album in raw_tags(), artist in raw_tags()) {
        let mut genres = engine();
        genres.add_tags(album, "rymdb", Scope::Album).unwrap();
        genres.add_tags(artist, "lastfm", Scope::Artist).unwrap();

        let ranked = genres.get(false);

        for scope in Scope::ALL {
            let tags = genres.tags(scope);
            if tags.is_empty() {
                continue;
            }
            let max = tags.values().copied().fold(0.0, f64::max);
            prop_assert!((max - 1.0).abs() < 1e-12, "{} max {}", scope, max);
        }
        prop_assert!(ranked.len() <= genres.tags(Scope::Album).len() + genres.tags(Scope::Artist).len());
    }

    #[test]
    fn filter_rejects_out_of_range_lengths(
        short in "[a-z]{0,2}",
        long in "[a-z]{20,40}",
    ) {
        let filter = TagFilter::new(&[]).unwrap();
        prop_assert!(short.len() < MIN_TAG_LEN && filter.is_filtered(&short));
        prop_assert!(long.len() > MAX_TAG_LEN && filter.is_filtered(&long));
    }

    #[test]
    fn format_is_idempotent(name in r"[a-z0-9&\- ]{0,19}") {
        let formatter = Formatter::new(["edm".to_string(), "idm".to_string()]);
        let once = formatter.format(&name);
        prop_assert_eq!(formatter.format(&once), once);
    }
}
