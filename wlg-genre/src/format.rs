//! Display casing of final tag names

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static DECADE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[0-9]{4}s").expect("valid decade regex"));

/// Renders tag names for display
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    /// Lowercase words always rendered uppercase
    uppercase: HashSet<String>,
}

impl Formatter {
    pub fn new(uppercase: impl IntoIterator<Item = String>) -> Self {
        Self {
            uppercase: uppercase.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Case a tag name word by word
    ///
    /// - words shorter than three characters (except "nu") and words from
    ///   the uppercase list are uppercased
    /// - all words of a decade tag ("1980s") are lowercased
    /// - everything else is title cased
    ///
    /// Word checks ignore case, so formatting is idempotent.
    pub fn format(&self, name: &str) -> String {
        let decade = DECADE.is_match(name);

        name.split(' ')
            .map(|word| {
                let lower = word.to_lowercase();
                if (word.chars().count() < 3 && lower != "nu") || self.uppercase.contains(&lower) {
                    word.to_uppercase()
                } else if decade {
                    lower
                } else {
                    title_case(word)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Uppercase every letter that starts a run of letters, lowercase the rest
///
/// "hip-hop" becomes "Hip-Hop", "r&b" becomes "R&B".
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_letter = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
