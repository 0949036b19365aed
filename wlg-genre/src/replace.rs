//! Tag text cleanup
//!
//! Turns a raw lowercase tag into its canonical spelling:
//! 1. Separator characters (`_ / \ , ; . + *`) and the word " and " become `&`
//! 2. Everything but `a-z 0-9 & -` and space is removed
//! 3. If the whole tag matches one of the configured replacement patterns,
//!    every replacement rule is applied in declaration order
//! 4. Runs of spaces collapse to one space, ends are trimmed
//!
//! The function is total: garbage in yields a possibly empty string.

use crate::error::Result;
use crate::rules::{compile_pattern, compile_whole_match};
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([_/\\,;.+*]| and )").expect("valid separator regex"));

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[^a-z0-9&\- ]").expect("valid charset regex"));

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"( +|_)").expect("valid space regex"));

/// Configured spelling substitutions
#[derive(Debug, Clone, Default)]
pub struct Replacer {
    /// Whole-tag match against any rule pattern; rules only run on a hit
    trigger: Option<Regex>,
    rules: Vec<(Regex, String)>,
}

impl Replacer {
    /// Compile `(pattern, replacement)` pairs
    ///
    /// Replacements may reference groups as `\1`; those are rewritten to
    /// the `${1}` form understood by the regex crate.
    pub fn new(rules: &[(String, String)]) -> Result<Self> {
        let patterns: Vec<String> = rules.iter().map(|(p, _)| p.clone()).collect();
        let trigger = compile_whole_match(&patterns)?;
        let rules = rules
            .iter()
            .map(|(pattern, repl)| Ok((compile_pattern(pattern)?, group_refs(repl))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { trigger, rules })
    }

    /// Number of replacement rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Clean up a tag name
    pub fn replace(&self, name: &str) -> String {
        let name = SEPARATORS.replace_all(name, "&");
        let mut name = DISALLOWED.replace_all(&name, "").into_owned();

        if self.trigger.as_ref().is_some_and(|re| re.is_match(&name)) {
            for (pattern, repl) in &self.rules {
                name = pattern.replace_all(&name, repl.as_str()).into_owned();
            }
        }

        SPACES.replace_all(&name, " ").trim().to_string()
    }
}

/// Rewrite `\N` and `\g<name>` group references into `${N}` / `${name}`
/// and escape literal `$`
fn group_refs(repl: &str) -> String {
    let mut out = String::with_capacity(repl.len());
    let mut chars = repl.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                        out.push(d);
                        chars.next();
                    }
                    out.push('}');
                }
                Some('g') => {
                    chars.next();
                    if chars.peek() == Some(&'<') {
                        chars.next();
                        out.push_str("${");
                        for n in chars.by_ref() {
                            if n == '>' {
                                break;
                            }
                            out.push(n);
                        }
                        out.push('}');
                    } else {
                        out.push_str("\\g");
                    }
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacer(rules: &[(&str, &str)]) -> Replacer {
        let rules: Vec<(String, String)> = rules
            .iter()
            .map(|(p, r)| (p.to_string(), r.to_string()))
            .collect();
        Replacer::new(&rules).unwrap()
    }

    #[test]
    fn test_separators_become_ampersand() {
        let r = replacer(&[]);
        assert_eq!(r.replace("rock/pop"), "rock&pop");
        assert_eq!(r.replace("drum and bass"), "drum&bass");
        assert_eq!(r.replace("a_b,c;d.e+f*g"), "a&b&c&d&e&f&g");
    }

    #[test]
    fn test_disallowed_characters_removed() {
        let r = replacer(&[]);
        assert_eq!(r.replace("post-rock!"), "post-rock");
        assert_eq!(r.replace("(90's) 'dance'"), "90s dance");
    }

    #[test]
    fn test_spaces_collapsed_and_trimmed() {
        let r = replacer(&[]);
        assert_eq!(r.replace("  dark    ambient "), "dark ambient");
    }

    #[test]
    fn test_rules_apply_only_on_whole_match() {
        let r = replacer(&[("hip ?hop", "hip-hop"), ("^alt$", "alternative")]);
        assert_eq!(r.replace("hip hop"), "hip-hop");
        assert_eq!(r.replace("hiphop"), "hip-hop");
        assert_eq!(r.replace("alt"), "alternative");
        // Partial hit does not trigger substitution
        assert_eq!(r.replace("abstract hip hop"), "abstract hip hop");
    }

    #[test]
    fn test_empty_replacement_deletes() {
        let r = replacer(&[("^(.*) music$", "\\1"), (" music$", "")]);
        assert_eq!(r.replace("ambient music"), "ambient");
    }

    #[test]
    fn test_group_refs() {
        assert_eq!(group_refs(r"\1 and \2"), "${1} and ${2}");
        assert_eq!(group_refs(r"\g<genre>"), "${genre}");
        assert_eq!(group_refs("cost $5"), "cost $$5");
        assert_eq!(group_refs("plain"), "plain");
    }

    #[test]
    fn test_total_on_garbage() {
        let r = replacer(&[]);
        assert_eq!(r.replace("!!!"), "");
        assert_eq!(r.replace(""), "");
    }
}
