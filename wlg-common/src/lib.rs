//! # WLG Common Library
//!
//! Shared code for the whatlastgenre crates including:
//! - Error types
//! - Configuration loading (scores, genre options, logging)
//! - Logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AmpersandSplit, GenreConfig, GenresConfig, LoggingConfig, RankedPolicy, ScoresConfig};
pub use error::{Error, Result};
