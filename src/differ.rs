//! Recursive comparator producing a diff tree: owns the list-expansion and
//! extra-keys policies.

use crate::matcher::{Mismatch, ValueMatcher};
use crate::path::{push_index, push_key};
use crate::rule_table::RuleTable;
use serde_json::Value;
use std::collections::BTreeMap;

/// A structural mirror of `expected`: objects and arrays recurse, leaves
/// carry either the passthrough actual value or a [`Mismatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum DiffTree {
    Object(BTreeMap<String, DiffTree>),
    Array(Vec<DiffTree>),
    Leaf(Result<Value, Mismatch>),
}

impl DiffTree {
    fn mismatch(mismatch: Mismatch) -> Self {
        DiffTree::Leaf(Err(mismatch))
    }
}

/// Compares `actual` against `expected` at `path`, dispatching on the kind
/// of `expected` and consulting `rules` at every node.
pub fn compare(
    actual: &Value,
    expected: &Value,
    path: &str,
    rules: &RuleTable,
    ignore_extra_keys: bool,
) -> DiffTree {
    match expected {
        Value::Object(expected_obj) => {
            let Some(actual_obj) = actual.as_object() else {
                return DiffTree::mismatch(Mismatch::TypeNotMatched {
                    actual: actual.clone(),
                    expected: expected.clone(),
                });
            };
            let mut children = BTreeMap::new();
            for (key, expected_value) in expected_obj {
                let child_path = push_key(path, key);
                let node = match actual_obj.get(key) {
                    None => DiffTree::mismatch(Mismatch::KeyNotFound(expected_value.clone())),
                    Some(actual_value) => {
                        compare(actual_value, expected_value, &child_path, rules, ignore_extra_keys)
                    }
                };
                children.insert(key.clone(), node);
            }
            if !ignore_extra_keys {
                for (key, actual_value) in actual_obj {
                    if !expected_obj.contains_key(key) {
                        children.insert(
                            key.clone(),
                            DiffTree::mismatch(Mismatch::UnexpectedKey(actual_value.clone())),
                        );
                    }
                }
            }
            DiffTree::Object(children)
        }
        Value::Array(expected_arr) => {
            let Some(actual_arr) = actual.as_array() else {
                return DiffTree::mismatch(Mismatch::TypeNotMatched {
                    actual: actual.clone(),
                    expected: expected.clone(),
                });
            };
            if let Some(rule) = rules.best(path) {
                if let Some(mismatch) = rule.diff(actual, expected) {
                    return DiffTree::mismatch(mismatch);
                }
            }
            compare_array_elements(actual_arr, expected_arr, path, rules, ignore_extra_keys)
        }
        _ => compare_scalar(actual, expected, path, rules),
    }
}

fn compare_array_elements(
    actual_arr: &[Value],
    expected_arr: &[Value],
    path: &str,
    rules: &RuleTable,
    ignore_extra_keys: bool,
) -> DiffTree {
    let max_len = actual_arr.len().max(expected_arr.len());
    let mut children = Vec::with_capacity(max_len);
    for i in 0..max_len {
        let child_path = push_index(path, i);
        let node = match (actual_arr.get(i), expected_arr.get(i)) {
            (Some(av), Some(ev)) => compare(av, ev, &child_path, rules, ignore_extra_keys),
            (None, Some(ev)) => DiffTree::mismatch(Mismatch::IndexNotFound(ev.clone())),
            (Some(av), None) => match expected_arr.first() {
                Some(pattern) if rules.best(&child_path).is_some() => {
                    compare(av, pattern, &child_path, rules, ignore_extra_keys)
                }
                _ => DiffTree::mismatch(Mismatch::UnexpectedIndex(av.clone())),
            },
            (None, None) => unreachable!("i is bounded by max(|actual|, |expected|)"),
        };
        children.push(node);
    }
    DiffTree::Array(children)
}

fn compare_scalar(actual: &Value, expected: &Value, path: &str, rules: &RuleTable) -> DiffTree {
    let matcher = rules.best(path).cloned().unwrap_or(ValueMatcher::Equality);
    match matcher.diff(actual, expected) {
        Some(mismatch) => DiffTree::mismatch(mismatch),
        None => DiffTree::Leaf(Ok(actual.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{PathMatcher, ROOT};
    use serde_json::json;

    fn has_mismatch(tree: &DiffTree) -> bool {
        match tree {
            DiffTree::Leaf(Err(_)) => true,
            DiffTree::Leaf(Ok(_)) => false,
            DiffTree::Object(children) => children.values().any(has_mismatch),
            DiffTree::Array(children) => children.iter().any(has_mismatch),
        }
    }

    #[test]
    fn identical_values_produce_no_mismatches() {
        let rules = RuleTable::new();
        let value = json!({"a": [1, 2, {"b": true}]});
        let tree = compare(&value, &value, ROOT, &rules, false);
        assert!(!has_mismatch(&tree));
    }

    #[test]
    fn missing_key_is_key_not_found() {
        let rules = RuleTable::new();
        let actual = json!({});
        let expected = json!({"id": 1});
        let tree = compare(&actual, &expected, ROOT, &rules, false);
        match tree {
            DiffTree::Object(children) => {
                assert_eq!(
                    children.get("id"),
                    Some(&DiffTree::Leaf(Err(Mismatch::KeyNotFound(json!(1)))))
                );
            }
            _ => panic!("expected an object diff"),
        }
    }

    #[test]
    fn extra_keys_are_ignored_when_policy_allows() {
        let rules = RuleTable::new();
        let actual = json!({"id": 1, "extra": true});
        let expected = json!({"id": 1});
        let tree = compare(&actual, &expected, ROOT, &rules, true);
        assert!(!has_mismatch(&tree));
    }

    #[test]
    fn extra_keys_are_flagged_when_policy_forbids() {
        let rules = RuleTable::new();
        let actual = json!({"id": 1, "extra": true});
        let expected = json!({"id": 1});
        let tree = compare(&actual, &expected, ROOT, &rules, false);
        match tree {
            DiffTree::Object(children) => {
                assert_eq!(
                    children.get("extra"),
                    Some(&DiffTree::Leaf(Err(Mismatch::UnexpectedKey(json!(true)))))
                );
            }
            _ => panic!("expected an object diff"),
        }
    }

    #[test]
    fn array_level_rule_short_circuits_element_walk() {
        let mut rules = RuleTable::new();
        rules.push(PathMatcher::compile("$").unwrap(), ValueMatcher::MinMax {
            min: Some(5),
            max: None,
        });
        let actual = json!([1]);
        let expected = json!([1]);
        let tree = compare(&actual, &expected, ROOT, &rules, false);
        assert!(matches!(tree, DiffTree::Leaf(Err(Mismatch::NumberNotMatched { .. }))));
    }

    #[test]
    fn array_expansion_with_type_rule_checks_extra_elements() {
        let mut rules = RuleTable::new();
        rules.push(PathMatcher::compile("$[*]").unwrap(), ValueMatcher::Type);
        let actual = json!(["a", "b", "c"]);
        let expected = json!(["a"]);
        let tree = compare(&actual, &expected, ROOT, &rules, false);
        assert!(!has_mismatch(&tree));
    }

    #[test]
    fn extra_array_elements_with_no_rule_are_unexpected_index() {
        let rules = RuleTable::new();
        let actual = json!(["a", "b"]);
        let expected = json!(["a"]);
        let tree = compare(&actual, &expected, ROOT, &rules, false);
        match tree {
            DiffTree::Array(children) => {
                assert_eq!(
                    children.get(1),
                    Some(&DiffTree::Leaf(Err(Mismatch::UnexpectedIndex(json!("b")))))
                );
            }
            _ => panic!("expected an array diff"),
        }
    }

    #[test]
    fn strings_are_never_descended_into() {
        let rules = RuleTable::new();
        let actual = json!("hello");
        let expected = json!("hello");
        let tree = compare(&actual, &expected, ROOT, &rules, false);
        assert_eq!(tree, DiffTree::Leaf(Ok(json!("hello"))));
    }
}
