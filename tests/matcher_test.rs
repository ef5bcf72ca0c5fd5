use pact_contract_core::matcher::Mismatch;
use pact_contract_core::ValueMatcher;
use serde_json::json;

#[test]
fn type_matcher_ignores_value_but_not_kind() {
    assert_eq!(ValueMatcher::Type.diff(&json!(1), &json!(2)), None);
    assert!(matches!(
        ValueMatcher::Type.diff(&json!(1), &json!("x")),
        Some(Mismatch::TypeNotMatched { .. })
    ));
}

#[test]
fn regex_matcher_anchors_at_start_only() {
    let digits = ValueMatcher::regex("[1-9]+").unwrap();
    assert_eq!(digits.diff(&json!(1), &json!(null)), None);
    assert!(matches!(
        digits.diff(&json!(0), &json!(null)),
        Some(Mismatch::RegexNotMatched { .. })
    ));

    let word_chars = ValueMatcher::regex(r"\d+").unwrap();
    assert!(matches!(
        word_chars.diff(&json!("abc"), &json!(null)),
        Some(Mismatch::RegexNotMatched { .. })
    ));
}

#[test]
fn min_max_bounds_array_length() {
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
