//! Rule table
//!
//! Compiled, process-lifetime rules derived from the static rule resource and
//! the caller's `[genres]` configuration. Built once per engine; only the
//! album filter inside [`TagFilter`] changes afterwards (on every reset).
//!
//! The rule resource is TOML with these sections:
//!
//! | Section               | Shape                 | Use                                    |
//! |-----------------------|-----------------------|----------------------------------------|
//! | `basictags`           | string array          | seed vocabulary for fuzzy matching     |
//! | `uppercase`           | string array          | words always rendered uppercase        |
//! | `splitpart`           | string array          | validated only                         |
//! | `dontsplit`           | string array          | patterns never decomposed              |
//! | `replaceme`           | pattern → replacement | canonical spelling substitutions       |
//! | `filter_<name>`       | string array          | exact blacklist patterns of a group    |
//! | `filter_<name>_fuzzy` | string array          | blacklist substrings of a group        |
//!
//! Every pattern matches case-insensitively; list patterns match whole tags.

use crate::error::{Error, Result};
use crate::filter::TagFilter;
use crate::format::Formatter;
use crate::replace::Replacer;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::debug;
use wlg_common::config::GenresConfig;

/// Rule resource shipped with the crate
pub const BUILTIN_RULES: &str = include_str!("../resources/tags.toml");

/// Sections every rule resource must carry
pub const REQUIRED_SECTIONS: [&str; 5] = ["basictags", "uppercase", "splitpart", "dontsplit", "replaceme"];

/// Filter groups that are always active
pub const DEFAULT_FILTERS: [&str; 2] = ["badtags", "generic"];

const FILTER_PREFIX: &str = "filter_";
const FUZZY_SUFFIX: &str = "_fuzzy";

/// Compiled rules
#[derive(Debug, Clone)]
pub struct RuleTable {
    filter: TagFilter,
    replacer: Replacer,
    formatter: Formatter,
    dont_split: Option<Regex>,
    love: Option<Regex>,
    hate: Option<Regex>,
    seed_vocabulary: Vec<String>,
}

impl RuleTable {
    /// Build from the embedded rule resource
    pub fn builtin(genres: &GenresConfig) -> Result<Self> {
        Self::from_toml_str(BUILTIN_RULES, genres)
    }

    /// Build from rule resource text
    ///
    /// # Errors
    /// - [`Error::RuleParse`] if the text is not TOML
    /// - [`Error::MissingSection`] if a required section is absent
    /// - [`Error::MissingFilter`] if an active filter group has no section
    /// - [`Error::InvalidSection`] if a section has the wrong shape
    /// - [`Error::Pattern`] if any rule or configured pattern fails to compile
    pub fn from_toml_str(text: &str, genres: &GenresConfig) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)?;

        for section in REQUIRED_SECTIONS {
            if !table.contains_key(section) {
                return Err(Error::MissingSection(section.to_string()));
            }
        }

        let active: Vec<&str> = DEFAULT_FILTERS
            .iter()
            .copied()
            .chain(genres.filters.iter().map(String::as_str))
            .collect();
        for group in &active {
            let exact = format!("{FILTER_PREFIX}{group}");
            let fuzzy = format!("{FILTER_PREFIX}{group}{FUZZY_SUFFIX}");
            if !table.contains_key(&exact) && !table.contains_key(&fuzzy) {
                return Err(Error::MissingFilter(group.to_string()));
            }
        }

        let basictags = lowercase(string_list(&table, "basictags")?);
        let uppercase = lowercase(string_list(&table, "uppercase")?);
        string_list(&table, "splitpart")?;
        let dont_split = string_list(&table, "dontsplit")?;
        let replaceme = pattern_map(&table, "replaceme")?;

        let mut blacklist: Vec<String> = genres.blacklist.clone();
        for (section, _) in table.iter() {
            let Some(group) = section.strip_prefix(FILTER_PREFIX) else {
                continue;
            };
            if active.contains(&group) {
                blacklist.extend(string_list(&table, section)?);
            } else if let Some(base) = group.strip_suffix(FUZZY_SUFFIX) {
                if active.contains(&base) {
                    blacklist.extend(
                        string_list(&table, section)?
                            .into_iter()
                            .map(|tag| format!(".*{tag}.*")),
                    );
                }
            }
        }

        let mut seed_vocabulary: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        for tag in basictags
            .iter()
            .chain(&genres.love)
            .chain(&genres.hate)
            .chain(&genres.blacklist)
        {
            let tag = tag.trim().to_lowercase();
            // Patterns can't serve as spellings
            if !is_plain_tag(&tag) {
                continue;
            }
            if seen.insert(tag.clone()) {
                seed_vocabulary.push(tag);
            }
        }

        let rules = Self {
            filter: TagFilter::new(&blacklist)?,
            replacer: Replacer::new(&replaceme)?,
            formatter: Formatter::new(uppercase),
            dont_split: compile_whole_match(&dont_split)?,
            love: compile_whole_match(&genres.love)?,
            hate: compile_whole_match(&genres.hate)?,
            seed_vocabulary,
        };

        debug!(
            filters = ?active,
            blacklist = blacklist.len(),
            chunks = rules.filter.chunk_count(),
            replaces = rules.replacer.len(),
            seeds = rules.seed_vocabulary.len(),
            "Rule table built"
        );

        Ok(rules)
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut TagFilter {
        &mut self.filter
    }

    pub fn replacer(&self) -> &Replacer {
        &self.replacer
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Canonical tags plus loved, hated and blacklisted names
    pub fn seed_vocabulary(&self) -> &[String] {
        &self.seed_vocabulary
    }

    /// Tag must never be decomposed
    pub fn is_dont_split(&self, name: &str) -> bool {
        self.dont_split.as_ref().is_some_and(|re| re.is_match(name))
    }

    pub fn is_loved(&self, name: &str) -> bool {
        self.love.as_ref().is_some_and(|re| re.is_match(name))
    }

    pub fn is_hated(&self, name: &str) -> bool {
        self.hate.as_ref().is_some_and(|re| re.is_match(name))
    }
}

/// Compile one case-insensitive pattern
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile alternatives into one whole-string, case-insensitive expression
///
/// An empty list compiles to nothing, which callers treat as "never matches".
pub(crate) fn compile_whole_match(patterns: &[String]) -> Result<Option<Regex>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    compile_pattern(&format!("^(?:{})$", patterns.join("|"))).map(Some)
}

fn string_list(table: &toml::Table, section: &str) -> Result<Vec<String>> {
    let invalid = |reason: &str| Error::InvalidSection {
        section: section.to_string(),
        reason: reason.to_string(),
    };

    let value = table
        .get(section)
        .ok_or_else(|| Error::MissingSection(section.to_string()))?;
    let items = value.as_array().ok_or_else(|| invalid("expected an array of strings"))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(|s| s.trim().to_string())
                .ok_or_else(|| invalid("every entry must be a string"))
        })
        .collect()
}

fn pattern_map(table: &toml::Table, section: &str) -> Result<Vec<(String, String)>> {
    let invalid = |reason: String| Error::InvalidSection {
        section: section.to_string(),
        reason,
    };

    let value = table
        .get(section)
        .ok_or_else(|| Error::MissingSection(section.to_string()))?;
    let entries = value
        .as_table()
        .ok_or_else(|| invalid("expected a table of pattern = replacement".to_string()))?;

    entries
        .iter()
        .map(|(pattern, repl)| {
            repl.as_str()
                .map(|r| (pattern.clone(), r.to_string()))
                .ok_or_else(|| invalid(format!("replacement for '{pattern}' must be a string")))
        })
        .collect()
}

fn is_plain_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'&' | b'-' | b' '))
}

fn lowercase(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}
