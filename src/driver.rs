//! Top-level comparison driver: normalizes both trees, compiles the rule
//! table per section, walks the fixed key order for the given kind, and
//! renders the result as a unified diff.

use crate::differ::compare;
use crate::log::{MatcherLog, TracingLog};
use crate::normalizer::{extract_matching_rules, normalize};
use crate::path::ROOT;
use crate::reconstructor::rebuild;
use crate::renderer::{render_diff, CompareOptions};
use crate::rule_table::RuleTable;
use serde_json::Value;

/// The outcome of one comparison: the rendered unified-diff lines and the
/// raw mismatches behind them, for callers embedding this in their own
/// test framework instead of printing text.
pub struct ComparisonOutcome {
    pub lines: Vec<String>,
    pub mismatches: Vec<crate::matcher::Mismatch>,
}

impl ComparisonOutcome {
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

struct Section<'a> {
    key: &'a str,
    ignore_extra_keys: bool,
}

fn run_comparison(
    mut actual: Value,
    mut expected: Value,
    sections: &[Section],
    options: &CompareOptions,
    log: &dyn MatcherLog,
) -> ComparisonOutcome {
    let sanitized_keys: Vec<&str> = sections.iter().map(|s| s.key).collect();
    normalize(&mut actual, &mut expected, &sanitized_keys, log);
    let matching_rules = extract_matching_rules(&mut expected);

    let mut diff_actual = serde_json::Map::new();
    let mut diff_expected = serde_json::Map::new();
    let mut mismatches = Vec::new();

    for section in sections {
        let Some(expected_value) = expected.get(section.key) else {
            continue;
        };
        let actual_value = actual.get(section.key).cloned().unwrap_or(Value::Null);
        let section_prefix = format!("$.{}", section.key);
        let rules = RuleTable::from_matching_rules(&matching_rules, &section_prefix, log)
            .unwrap_or_else(|err| {
                log.normalizer_swallowed("matchingRules", &err.to_string());
                RuleTable::default()
            });
        let path = crate::path::push_key(ROOT, section.key);
        let diff = compare(
            &actual_value,
            expected_value,
            &path,
            &rules,
            section.ignore_extra_keys,
        );
        let reconstructed = rebuild(&diff);
        diff_actual.insert(section.key.to_string(), reconstructed.actual);
        diff_expected.insert(section.key.to_string(), reconstructed.expected);
        mismatches.extend(reconstructed.errors);
    }

    let lines: Vec<String> = render_diff(
        &Value::Object(diff_actual),
        &Value::Object(diff_expected),
        options,
    )
    .collect();

    ComparisonOutcome { lines, mismatches }
}

const REQUEST_SECTIONS: &[Section] = &[
    Section { key: "method", ignore_extra_keys: false },
    Section { key: "path", ignore_extra_keys: false },
    Section { key: "query", ignore_extra_keys: false },
    Section { key: "headers", ignore_extra_keys: true },
    Section { key: "body", ignore_extra_keys: false },
];

const RESPONSE_SECTIONS: &[Section] = &[
    Section { key: "status", ignore_extra_keys: false },
    Section { key: "headers", ignore_extra_keys: true },
    Section { key: "body", ignore_extra_keys: true },
];

/// Compares an actual HTTP request against the expected one, yielding
/// unified-diff lines (empty iff matching).
pub fn compare_requests(actual: Value, expected: Value) -> impl Iterator<Item = String> {
    let outcome = run_comparison(actual, expected, REQUEST_SECTIONS, &CompareOptions::default(), &TracingLog);
    outcome.lines.into_iter()
}

/// Compares an actual HTTP response against the expected one, yielding
/// unified-diff lines (empty iff matching).
pub fn compare_responses(actual: Value, expected: Value) -> impl Iterator<Item = String> {
    let outcome = run_comparison(actual, expected, RESPONSE_SECTIONS, &CompareOptions::default(), &TracingLog);
    outcome.lines.into_iter()
}

/// Same as [`compare_requests`] but returns the structured outcome
/// (mismatches plus rendered lines) instead of only the lines.
pub fn compare_requests_detailed(
    actual: Value,
    expected: Value,
    options: &CompareOptions,
    log: &dyn MatcherLog,
) -> ComparisonOutcome {
    run_comparison(actual, expected, REQUEST_SECTIONS, options, log)
}

/// Same as [`compare_responses`] but returns the structured outcome.
pub fn compare_responses_detailed(
    actual: Value,
    expected: Value,
    options: &CompareOptions,
    log: &dyn MatcherLog,
) -> ComparisonOutcome {
    run_comparison(actual, expected, RESPONSE_SECTIONS, options, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NullLog;
    use serde_json::json;

    #[test]
    fn matching_request_yields_no_lines() {
        let actual = json!({"method": "GET", "path": "/x", "query": "", "headers": {}, "body": {}});
        let expected = actual.clone();
        let lines: Vec<_> = compare_requests(actual, expected).collect();
        assert!(lines.is_empty());
    }

    #[test]
    fn mismatched_body_is_reported() {
        let actual = json!({"method": "get", "path": "/x", "query": "", "headers": {}, "body": {"toto": 1}});
        let expected = json!({"method": "GET", "path": "/x", "query": "", "headers": {}, "body": {"toto": 2}});
        let outcome = compare_requests_detailed(actual, expected, &CompareOptions::default(), &NullLog);
        assert!(!outcome.is_match());
        assert!(!outcome.lines.is_empty());
    }

    #[test]
    fn headers_ignore_extra_keys_in_actual() {
        let actual = json!({"status": 200, "headers": {"x-extra": "1"}, "body": {}});
        let expected = json!({"status": 200, "headers": {}, "body": {}});
        let outcome = compare_responses_detailed(actual, expected, &CompareOptions::default(), &NullLog);
        assert!(outcome.is_match());
    }
}
