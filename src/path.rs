//! Compiles the restricted JSONPath selector DSL into a regex plus an
//! integer specificity weight, and builds the concrete bracket-notation
//! paths the differ walks against.

use crate::error::CompileError;
use regex::Regex;

/// The implicit root every concrete path starts with.
pub const ROOT: &str = "['$']";

/// Appends a key segment to a concrete path, e.g. `['$']` + `"body"` →
/// `['$']['body']`.
pub fn push_key(path: &str, key: &str) -> String {
    format!("{path}['{key}']")
}

/// Appends an index segment to a concrete path, e.g. `['$']` + `0` →
/// `['$'][0]`.
pub fn push_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

/// A compiled selector: a regex matching concrete paths it covers, and the
/// specificity weight used to pick the most specific rule in a
/// [`crate::rule_table::RuleTable`].
#[derive(Debug, Clone)]
pub struct PathMatcher {
    regex: Regex,
    weight: u64,
    selector: String,
}

impl PathMatcher {
    /// Compiles a JSONPath selector into a [`PathMatcher`].
    pub fn compile(selector: &str) -> Result<Self, CompileError> {
        let work = format!(".{selector}");
        let tokens = tokenize(&work);
        let mut pattern = String::from("^");
        let mut weight: u64 = 1;
        let last = tokens.len().saturating_sub(1);

        for (i, token) in tokens.iter().enumerate() {
            let is_last = i == last;
            if let Some(content) = token.strip_prefix('.') {
                if content.is_empty() {
                    pattern.push_str(r"\['[^']*'\]");
                } else if content == "*" {
                    if is_last {
                        pattern.push_str(".*");
                    } else {
                        pattern.push_str(r"\['.*'\]");
                    }
                } else {
                    pattern.push_str(&format!(r"\['{}'\]", regex::escape(content)));
                    weight *= 2;
                }
            } else {
                let inner = &token[1..token.len() - 1];
                if inner.is_empty() || inner == "*" {
                    pattern.push_str(r"\[[0-9]+\]");
                } else if inner.starts_with('\'') && inner.ends_with('\'') && inner.len() >= 2 {
                    let key = &inner[1..inner.len() - 1];
                    pattern.push_str(&format!(r"\['{}'\]", regex::escape(key)));
                    weight *= 2;
                } else if inner.chars().all(|c| c.is_ascii_digit()) {
                    pattern.push_str(&format!(r"\[{inner}\]"));
                    weight *= 2;
                } else {
                    return Err(CompileError::InvalidPathSegment {
                        selector: selector.to_string(),
                        segment: token.clone(),
                    });
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|source| CompileError::InvalidRegex {
            pattern: pattern.clone(),
            message: source.to_string(),
        })?;

        Ok(PathMatcher {
            regex,
            weight,
            selector: selector.to_string(),
        })
    }

    /// Whether `path` (in bracket notation) is covered by this selector.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The stored weight if `path` matches, else zero.
    pub fn weight(&self, path: &str) -> u64 {
        if self.matches(path) { self.weight } else { 0 }
    }

    /// The original selector text this matcher was compiled from.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

fn tokenize(work: &str) -> Vec<String> {
    let chars: Vec<char> = work.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '.' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    i += 1;
                }
                tokens.push(chars[start..i].iter().collect());
            }
            '[' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }
                if i < chars.len() {
                    i += 1;
                }
                tokens.push(chars[start..i].iter().collect());
            }
            _ => i += 1,
        }
    }
    tokens
}
