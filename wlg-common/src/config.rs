//! Configuration model and loading
//!
//! The configuration file is TOML with three sections:
//!
//! ```toml
//! [scores]
//! artist = 1.33
//! various = 0.66
//! splitup = 0.33
//! src_discogs = 1.0
//! src_lastfm = 0.66
//!
//! [genres]
//! filters = ["country", "decade"]
//! love = ["soundtrack"]
//! hate = ["pop", "rock"]
//! blacklist = ["charts"]
//! ampersand_split = "all"
//! ranked_policy = "flat"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a built-in default, so a partial file (or no file at all)
//! is valid.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of per-source trust multiplier keys in `[scores]`
pub const SOURCE_KEY_PREFIX: &str = "src_";

/// Built-in source trust multipliers
const DEFAULT_SOURCES: &[(&str, f64)] = &[
    ("discogs", 1.0),
    ("lastfm", 0.66),
    ("mbrainz", 0.66),
    ("redacted", 1.5),
    ("rymdb", 1.33),
    ("whatcd", 1.5),
];

/// Complete genre tagging configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenreConfig {
    /// Score multipliers
    pub scores: ScoresConfig,

    /// Genre list options
    pub genres: GenresConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// `[scores]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoresConfig {
    /// Multiplier for artist-scope tags of a single-artist release
    pub artist: f64,

    /// Multiplier for artist-scope tags of a various-artists release
    pub various: f64,

    /// Fraction of score a decomposed two-word tag keeps for itself
    pub splitup: f64,

    /// Per-source trust multipliers, keyed `src_<source>`
    #[serde(flatten)]
    pub sources: BTreeMap<String, f64>,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            artist: 1.33,
            various: 0.66,
            splitup: 0.33,
            sources: DEFAULT_SOURCES
                .iter()
                .map(|(name, multi)| (format!("{SOURCE_KEY_PREFIX}{name}"), *multi))
                .collect(),
        }
    }
}

impl ScoresConfig {
    /// Trust multiplier for a source
    ///
    /// Sources missing from the file fall back to the built-in table.
    /// Returns `None` for sources nobody knows about.
    pub fn source_multiplier(&self, source: &str) -> Option<f64> {
        let key = format!("{SOURCE_KEY_PREFIX}{source}");
        self.sources.get(&key).copied().or_else(|| {
            DEFAULT_SOURCES
                .iter()
                .find(|(name, _)| *name == source)
                .map(|(_, multi)| *multi)
        })
    }
}

/// How the splitter treats `&`-joined compound tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmpersandSplit {
    /// Every unfiltered segment receives the full score
    #[default]
    All,

    /// Only the first segment is dispatched (legacy behavior)
    #[serde(rename = "first")]
    FirstOnly,
}

/// Scoring policy for tag lists that carry no weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankedPolicy {
    /// Every tag gets `0.85^(len - 1)`, regardless of position
    #[default]
    Flat,

    /// Tag at position `i` gets `0.85^i`
    #[serde(rename = "rank")]
    RankDecay,
}

/// `[genres]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenresConfig {
    /// Extra filter groups to activate on top of `badtags` and `generic`
    pub filters: Vec<String>,

    /// Patterns of tags that get a score bonus
    pub love: Vec<String>,

    /// Patterns of tags that get a score penalty
    pub hate: Vec<String>,

    /// Patterns of tags that are always rejected
    pub blacklist: Vec<String>,

    /// Compound `a&b` handling
    pub ampersand_split: AmpersandSplit,

    /// Unweighted list scoring
    pub ranked_policy: RankedPolicy,
}

impl Default for GenresConfig {
    fn default() -> Self {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            filters: strings(&[
                "country",
                "decade",
                "instrument",
                "label",
                "location",
                "name",
                "originality",
                "personal",
                "vague",
                "year",
            ]),
            love: strings(&["soundtrack"]),
            hate: strings(&["alternative", "electronic", "indie", "pop", "rock"]),
            blacklist: strings(&["charts", "other", "unknown"]),
            ampersand_split: AmpersandSplit::default(),
            ranked_policy: RankedPolicy::default(),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl GenreConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GenreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `<config_dir>/wlg/config.toml`, or defaults when there is none
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                info!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check value ranges
    ///
    /// Multipliers must be finite and non-negative, and the splitup discount
    /// must be a fraction below one.
    pub fn validate(&self) -> Result<()> {
        let scores = &self.scores;
        for (name, value) in [("artist", scores.artist), ("various", scores.various)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "scores.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..1.0).contains(&scores.splitup) {
            return Err(Error::Config(format!(
                "scores.splitup must be in [0, 1), got {}",
                scores.splitup
            )));
        }

        for (key, value) in &scores.sources {
            if !key.starts_with(SOURCE_KEY_PREFIX) {
                return Err(Error::Config(format!(
                    "Unknown key scores.{key} (source multipliers are named {SOURCE_KEY_PREFIX}<source>)"
                )));
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(Error::Config(format!(
                    "scores.{key} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Platform location of the user config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wlg").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GenreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_source_multiplier_falls_back_to_builtin() {
        let config = GenreConfig::from_toml_str("[scores]\nsrc_lastfm = 0.5\n").unwrap();
        assert_eq!(config.scores.source_multiplier("lastfm"), Some(0.5));
        assert_eq!(config.scores.source_multiplier("discogs"), Some(1.0));
        assert_eq!(config.scores.source_multiplier("nowhere"), None);
    }

    #[test]
    fn test_policy_names() {
        let config = GenreConfig::from_toml_str(
            "[genres]\nampersand_split = \"first\"\nranked_policy = \"rank\"\n",
        )
        .unwrap();
        assert_eq!(config.genres.ampersand_split, AmpersandSplit::FirstOnly);
        assert_eq!(config.genres.ranked_policy, RankedPolicy::RankDecay);
    }

    #[test]
    fn test_splitup_out_of_range_rejected() {
        let result = GenreConfig::from_toml_str("[scores]\nsplitup = 1.5\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
