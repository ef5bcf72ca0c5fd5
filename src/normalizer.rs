//! In-place canonicalization of request/response trees: method case,
//! header folding, matching-rule key folding, query parsing, and
//! missing-in-contract key pruning.

use crate::log::MatcherLog;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

/// Removes `matchingRules` from `expected` and returns its contents, or an
/// empty map if absent. Per the data model, the rule table is derived from
/// this subtree, which is then gone from the tree the differ walks.
pub fn extract_matching_rules(expected: &mut Value) -> Map<String, Value> {
    expected
        .as_object_mut()
        .and_then(|obj| obj.remove("matchingRules"))
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default()
}

/// Drops, from `actual`, any key in `sanitized_keys` that is absent from
/// `expected` — keys the contract doesn't mention are not checked.
fn prune_missing_keys(actual: &mut Value, expected: &Value, sanitized_keys: &[&str]) {
    let Some(expected_obj) = expected.as_object() else {
        return;
    };
    let Some(actual_obj) = actual.as_object_mut() else {
        return;
    };
    for key in sanitized_keys {
        if !expected_obj.contains_key(*key) {
            actual_obj.remove(*key);
        }
    }
}

fn lowercase_method(tree: &mut Value) {
    if let Some(Value::String(method)) = tree.get_mut("method") {
        *method = method.to_lowercase();
    }
}

fn canonicalize_header_value(value: &str) -> String {
    value
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(",")
}

fn fold_headers(tree: &mut Value, log: &dyn MatcherLog) {
    let Some(headers) = tree.get_mut("headers").and_then(Value::as_object_mut) else {
        return;
    };
    let folded: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            let lower_name = name.to_lowercase();
            let folded_value = match value {
                Value::String(s) => Value::String(canonicalize_header_value(s)),
                other => {
                    log.normalizer_swallowed("headers", "header value is not a string, left unchanged");
                    other.clone()
                }
            };
            (lower_name, folded_value)
        })
        .collect();
    *headers = folded;
}

fn lowercase_matching_rule_header_keys(tree: &mut Value) {
    let Some(rules) = tree.get_mut("matchingRules").and_then(Value::as_object_mut) else {
        return;
    };
    let keys_to_fold: Vec<String> = rules
        .keys()
        .filter(|k| k.starts_with("$.headers"))
        .cloned()
        .collect();
    for key in keys_to_fold {
        let lowered = key.to_lowercase();
        if lowered != key {
            if let Some(value) = rules.remove(&key) {
                rules.insert(lowered, value);
            }
        }
    }
}

/// Parses a URL-encoded query string into `name -> [values]`, preserving
/// empty values (`a=&b=1` becomes `{"a": [""], "b": ["1"]}`).
fn parse_query_string(query: &str) -> Value {
    let mut map: Map<String, Value> = Map::new();
    if query.is_empty() {
        return Value::Object(map);
    }
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let name = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        let name = percent_decode_str(&name.replace('+', " "))
            .decode_utf8_lossy()
            .into_owned();
        let value = percent_decode_str(&value.replace('+', " "))
            .decode_utf8_lossy()
            .into_owned();
        match map.entry(name).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(values) => values.push(Value::String(value)),
            _ => unreachable!("entry is always inserted as an array"),
        }
    }
    Value::Object(map)
}

fn parse_query(tree: &mut Value) {
    let Some(obj) = tree.as_object_mut() else {
        return;
    };
    let Some(Value::String(query)) = obj.get("query") else {
        return;
    };
    let parsed = parse_query_string(query);
    obj.insert("query".to_string(), parsed);
}

/// Applies every best-effort canonicalization transform to one tree
/// (either `actual` or `expected`).
fn canonicalize(tree: &mut Value, log: &dyn MatcherLog) {
    lowercase_method(tree);
    fold_headers(tree, log);
    lowercase_matching_rule_header_keys(tree);
    parse_query(tree);
}

/// Normalizes both trees in place: prunes actual-only keys the contract
/// doesn't mention, then applies canonicalization to each tree
/// independently. Idempotent: normalizing an already-normalized tree is a
/// no-op.
pub fn normalize(actual: &mut Value, expected: &mut Value, sanitized_keys: &[&str], log: &dyn MatcherLog) {
    prune_missing_keys(actual, expected, sanitized_keys);
    canonicalize(actual, log);
    canonicalize(expected, log);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NullLog;
    use serde_json::json;

    #[test]
    fn lowercases_method() {
        let mut tree = json!({"method": "POST"});
        lowercase_method(&mut tree);
        assert_eq!(tree["method"], "post");
    }

    #[test]
    fn folds_header_names_and_values() {
        let mut tree = json!({"headers": {"Content-Type": " application/json , charset=utf-8 "}});
        fold_headers(&mut tree, &NullLog);
        assert_eq!(tree["headers"]["content-type"], "application/json,charset=utf-8");
    }

    #[test]
    fn query_parsing_preserves_blank_values() {
        let value = parse_query_string("a=&b=1");
        assert_eq!(value, json!({"a": [""], "b": ["1"]}));
    }

    #[test]
    fn prunes_actual_only_sanitized_keys() {
        let mut actual = json!({"headers": {"x": "1"}, "status": 200});
        let expected = json!({"status": 200});
        prune_missing_keys(&mut actual, &expected, &["headers", "status"]);
        assert!(actual.get("headers").is_none());
        assert_eq!(actual["status"], 200);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut actual = json!({"method": "GET", "query": "a=1&a=2"});
        let mut expected = json!({"method": "GET", "query": "a=1&a=2"});
        normalize(&mut actual, &mut expected, &[], &NullLog);
        let once = actual.clone();
        normalize(&mut actual, &mut expected, &[], &NullLog);
        assert_eq!(actual, once);
    }
}
