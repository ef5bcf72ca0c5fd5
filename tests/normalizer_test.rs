use pact_contract_core::log::NullLog;
use pact_contract_core::normalizer::normalize;
use serde_json::json;

#[test]
fn query_string_blank_values_are_preserved_through_normalization() {
    let mut actual = json!({"query": "a=&b=1"});
    let mut expected = json!({"query": "a=&b=1"});
    normalize(&mut actual, &mut expected, &[], &NullLog);
    assert_eq!(actual["query"], json!({"a": [""], "b": ["1"]}));
}

#[test]
fn matching_rule_header_keys_are_lowercased_alongside_header_names() {
    let mut expected = json!({
        "headers": {"X-Request-Id": "abc"},
        "matchingRules": {"$.headers.X-Request-Id": {"match": "regex", "regex": "[a-z]+"}}
    });
    let mut actual = json!({"headers": {"x-request-id": "abc"}});
    normalize(&mut actual, &mut expected, &[], &NullLog);
    assert!(
        expected["matchingRules"]
            .as_object()
            .unwrap()
            .contains_key("$.headers.x-request-id")
    );
}

#[test]
fn keys_absent_from_expected_are_pruned_from_actual() {
    let mut actual = json!({"headers": {"x": "1"}, "body": {}});
    let mut expected = json!({"body": {}});
    normalize(&mut actual, &mut expected, &["headers", "body"], &NullLog);
    assert!(actual.get("headers").is_none());
}
