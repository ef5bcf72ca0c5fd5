//! A collection of compiled matching rules with "most specific wins"
//! lookup by concrete path.

use crate::error::CompileError;
use crate::log::MatcherLog;
use crate::matcher::ValueMatcher;
use crate::path::PathMatcher;
use serde_json::{Map, Value};

/// An ordered collection of `(PathMatcher, ValueMatcher)` pairs compiled
/// from a `matchingRules` document.
#[derive(Debug, Default)]
pub struct RuleTable {
    entries: Vec<(PathMatcher, ValueMatcher)>,
}

impl RuleTable {
    pub fn new() -> Self {
        RuleTable { entries: Vec::new() }
    }

    pub fn push(&mut self, path: PathMatcher, value: ValueMatcher) {
        self.entries.push((path, value));
    }

    /// Compiles a `matchingRules` mapping (selector → rule descriptor) into
    /// a table, keeping only entries whose selector is rooted under
    /// `section_prefix` (e.g. `$.headers`), so that each comparison section
    /// only ever sees its own rules.
    pub fn from_matching_rules(
        matching_rules: &Map<String, Value>,
        section_prefix: &str,
        log: &dyn MatcherLog,
    ) -> Result<Self, CompileError> {
        let mut table = RuleTable::new();
        for (selector, descriptor) in matching_rules {
            if !selector.starts_with(section_prefix) {
                continue;
            }
            let path = PathMatcher::compile(selector)?;
            let descriptor = descriptor.as_object().cloned().unwrap_or_default();
            let value = ValueMatcher::from_descriptor(&descriptor, log)?;
            table.push(path, value);
        }
        Ok(table)
    }

    /// The value-matcher of the entry with the highest non-zero weight at
    /// `path`, or `None` if no entry covers it.
    pub fn best(&self, path: &str) -> Option<&ValueMatcher> {
        self.entries
            .iter()
            .map(|(p, v)| (p.weight(path), v))
            .filter(|(weight, _)| *weight > 0)
            .max_by_key(|(weight, _)| *weight)
            .map(|(_, v)| v)
    }
}
