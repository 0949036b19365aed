//! # WLG Genre
//!
//! Normalizes and ranks genre tag candidates gathered from several metadata
//! sources into one canonical, deduplicated, score-ranked list per release.
//!
//! Each candidate passes through:
//! - [`filter`]: length bounds, static blacklist, per-release album filter
//! - [`replace`]: character cleanup and canonical spelling substitutions
//! - [`matcher`]: fuzzy merge into an already known spelling
//! - the splitter in [`engine`]: compound tags hand score to their parts
//! - [`scope`]: per-scope accumulation, normalized and merged by
//!   [`GenreTags::get`]
//!
//! ```no_run
//! use wlg_common::GenreConfig;
//! use wlg_genre::{GenreTags, Release, Scope};
//!
//! # fn main() -> wlg_genre::Result<()> {
//! let mut genres = GenreTags::new(&GenreConfig::default())?;
//! genres.reset(&Release::new(Some("Massive Attack"), Some("Mezzanine")));
//! genres.add_tags(vec![("trip-hop", 100.0), ("electronic", 60.0)], "lastfm", Scope::Album)?;
//! genres.add_tags(vec!["trip hop", "downtempo"], "discogs", Scope::Album)?;
//! let _tags = genres.get(false);
//! # Ok(())
//! # }
//! ```

pub mod album_filter;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod input;
pub mod matcher;
pub mod metadata;
pub mod replace;
pub mod rules;
pub mod scope;

pub use engine::{GenreTags, RankedTag};
pub use error::{Error, Result};
pub use input::TagInput;
pub use metadata::{Release, ReleaseMetadata};
pub use rules::RuleTable;
pub use scope::Scope;
