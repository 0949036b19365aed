//! Error types for wlg-genre
//!
//! Only construction can fail in a way that matters: a broken rule resource
//! or configuration. The per-tag pipeline itself is total.

use thiserror::Error;

/// Main error type for wlg-genre
#[derive(Error, Debug)]
pub enum Error {
    /// Required section missing from the rule resource
    #[error("Rule resource has no [{0}] section")]
    MissingSection(String),

    /// An activated filter group has neither an exact nor a fuzzy section
    #[error("The configured filter '{0}' doesn't have a [filter_{0}] or [filter_{0}_fuzzy] section")]
    MissingFilter(String),

    /// Section present but of the wrong shape
    #[error("Invalid [{section}] section: {reason}")]
    InvalidSection { section: String, reason: String },

    /// A rule or configured pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Rule resource is not valid TOML
    #[error("Rule resource parse error: {0}")]
    RuleParse(#[from] toml::de::Error),

    /// Tags were added for a source without a trust multiplier
    #[error("No score multiplier configured for source '{0}' (scores.src_{0})")]
    UnknownSource(String),

    /// Shared configuration error
    #[error(transparent)]
    Common(#[from] wlg_common::Error),
}

/// Convenience Result type using wlg-genre Error
pub type Result<T> = std::result::Result<T, Error>;
