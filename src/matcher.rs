//! Value-level matcher taxonomy: equality, regex, type, and min/max
//! cardinality, each reduced to a single `diff` operation.

use crate::error::CompileError;
use crate::log::MatcherLog;
use regex::Regex;
use serde_json::{Map, Value};

/// A structural disagreement between an actual value and what was expected
/// at a given path. Mismatches are data, never exceptions — the differ
/// collects them into the diff tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// Expected object key missing from actual. Carries the expected
    /// value that was missing, so the reconstructor can still show it on
    /// the expected side of the rendered diff.
    KeyNotFound(Value),
    /// Actual object key absent from expected (only recorded when the
    /// node's ignore-extra-keys policy is false). Carries the actual
    /// value that was unexpected.
    UnexpectedKey(Value),
    /// Expected array index missing from actual. Carries the expected
    /// value at that index.
    IndexNotFound(Value),
    /// Actual array index absent from expected. Carries the actual value
    /// at that index.
    UnexpectedIndex(Value),
    /// Scalar inequality.
    Difference { actual: Value, expected: Value },
    /// `Regex` matcher failed against `actual`.
    RegexNotMatched { actual: Value, pattern: String },
    /// `Type` matcher failed: runtime kinds differ.
    TypeNotMatched { actual: Value, expected: Value },
    /// `MinMax` matcher failed: sequence length out of range.
    NumberNotMatched {
        actual: Value,
        expected: Value,
        min: Option<u64>,
        max: Option<u64>,
    },
}

/// The runtime kind of a tree value, used by the `Type` matcher.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
    }
}

/// A value-level predicate overriding default equality at a path.
#[derive(Debug, Clone)]
pub enum ValueMatcher {
    Equality,
    Regex(Regex),
    Type,
    MinMax { min: Option<u64>, max: Option<u64> },
}

impl ValueMatcher {
    /// Builds a `MinMax` matcher, validating `min <= max` when both are set.
    pub fn min_max(min: Option<u64>, max: Option<u64>) -> Result<Self, CompileError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(CompileError::InvalidRange { min, max });
            }
        }
        Ok(ValueMatcher::MinMax { min, max })
    }

    /// Builds a `Regex` matcher from a pattern string.
    pub fn regex(pattern: &str) -> Result<Self, CompileError> {
        let re = Regex::new(pattern).map_err(|source| CompileError::InvalidRegex {
            pattern: pattern.to_string(),
            message: source.to_string(),
        })?;
        Ok(ValueMatcher::Regex(re))
    }

    /// Decodes a rule descriptor into a `ValueMatcher` per the decoder
    /// table: `match: "regex"` with `regex`, `match: "type"` (optionally
    /// with `min`/`max`), bare `min`/`max`, or a fallback to `Equality` for
    /// anything unrecognized (logged via `log`).
    pub fn from_descriptor(
        descriptor: &Map<String, Value>,
        log: &dyn MatcherLog,
    ) -> Result<Self, CompileError> {
        let match_kind = descriptor.get("match").and_then(Value::as_str);
        let min = descriptor.get("min").and_then(Value::as_u64);
        let max = descriptor.get("max").and_then(Value::as_u64);

        match match_kind {
            Some("regex") => {
                let pattern = descriptor
                    .get("regex")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                ValueMatcher::regex(pattern)
            }
            Some("type") if min.is_some() || max.is_some() => ValueMatcher::min_max(min, max),
            Some("type") => Ok(ValueMatcher::Type),
            _ if min.is_some() || max.is_some() => ValueMatcher::min_max(min, max),
            _ => {
                log.unrecognized_matcher(descriptor);
                Ok(ValueMatcher::Equality)
            }
        }
    }

    /// Compares `actual` against `expected`, returning `None` on success.
    pub fn diff(&self, actual: &Value, expected: &Value) -> Option<Mismatch> {
        match self {
            ValueMatcher::Equality => {
                if actual == expected {
                    None
                } else {
                    Some(Mismatch::Difference {
                        actual: actual.clone(),
                        expected: expected.clone(),
                    })
                }
            }
            ValueMatcher::Regex(re) => {
                let text = scalar_as_text(actual);
                if re.find(&text).is_some_and(|m| m.start() == 0) {
                    None
                } else {
                    Some(Mismatch::RegexNotMatched {
                        actual: actual.clone(),
                        pattern: re.as_str().to_string(),
                    })
                }
            }
            ValueMatcher::Type => {
                if kind_of(actual) == kind_of(expected) {
                    None
                } else {
                    Some(Mismatch::TypeNotMatched {
                        actual: actual.clone(),
                        expected: expected.clone(),
                    })
                }
            }
            ValueMatcher::MinMax { min, max } => {
                let len = actual.as_array().map_or(0, Vec::len) as u64;
                let under = min.is_some_and(|min| len < min);
                let over = max.is_some_and(|max| len > max);
                if under || over {
                    Some(Mismatch::NumberNotMatched {
                        actual: actual.clone(),
                        expected: expected.clone(),
                        min: *min,
                        max: *max,
                    })
                } else {
                    None
                }
            }
        }
    }
}

fn scalar_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NullLog;
    use serde_json::json;

    #[test]
    fn type_matcher_ignores_value_only_kind() {
        assert_eq!(ValueMatcher::Type.diff(&json!(1), &json!(2)), None);
        assert!(matches!(
            ValueMatcher::Type.diff(&json!(1), &json!("x")),
            Some(Mismatch::TypeNotMatched { .. })
        ));
    }

    #[test]
    fn regex_matcher_is_prefix_anchored() {
        let m = ValueMatcher::regex("[1-9]+").unwrap();
        assert_eq!(m.diff(&json!(1), &json!(null)), None);
        assert!(matches!(
            m.diff(&json!(0), &json!(null)),
            Some(Mismatch::RegexNotMatched { .. })
        ));
        let digits = ValueMatcher::regex(r"\d+").unwrap();
        assert!(matches!(
            digits.diff(&json!("abc"), &json!(null)),
            Some(Mismatch::RegexNotMatched { .. })
        ));
    }

    #[test]
    fn min_max_checks_array_length() {
        let at_least_one = ValueMatcher::min_max(Some(1), None).unwrap();
        assert!(matches!(
            at_least_one.diff(&json!([]), &json!(null)),
            Some(Mismatch::NumberNotMatched { .. })
        ));
        assert_eq!(at_least_one.diff(&json!(["a"]), &json!(null)), None);

        let at_most_one = ValueMatcher::min_max(None, Some(1)).unwrap();
        assert!(matches!(
            at_most_one.diff(&json!(["a", "b"]), &json!(null)),
            Some(Mismatch::NumberNotMatched { .. })
        ));
    }

    #[test]
    fn min_greater_than_max_is_a_construction_error() {
        assert!(matches!(
            ValueMatcher::min_max(Some(5), Some(1)),
            Err(CompileError::InvalidRange { .. })
        ));
    }

    #[test]
    fn unrecognized_descriptor_falls_back_to_equality() {
        let descriptor = Map::new();
        let matcher = ValueMatcher::from_descriptor(&descriptor, &NullLog).unwrap();
        assert!(matches!(matcher, ValueMatcher::Equality));
    }
}
