//! Collapses a diff tree back into an `(actual, expected)` pair of JSON
//! trees plus the flat list of mismatches found along the way.

use crate::differ::DiffTree;
use crate::matcher::Mismatch;
use serde_json::{Map, Value};

/// The result of collapsing a [`DiffTree`]: both sides rendered as plain
/// JSON (with mismatches substituted in place), plus the mismatches in
/// the order they were discovered.
pub struct Reconstructed {
    pub actual: Value,
    pub expected: Value,
    pub errors: Vec<Mismatch>,
}

/// Collapses `diff` into an actual/expected pair, collecting every
/// mismatch encountered along the way.
pub fn rebuild(diff: &DiffTree) -> Reconstructed {
    let mut errors = Vec::new();
    let (actual, expected) = rebuild_node(diff, &mut errors);
    Reconstructed {
        actual,
        expected,
        errors,
    }
}

fn rebuild_node(node: &DiffTree, errors: &mut Vec<Mismatch>) -> (Value, Value) {
    match node {
        DiffTree::Object(children) => {
            let mut actual_obj = Map::new();
            let mut expected_obj = Map::new();
            for (key, child) in children {
                let (actual_value, expected_value) = rebuild_node(child, errors);
                actual_obj.insert(key.clone(), actual_value);
                expected_obj.insert(key.clone(), expected_value);
            }
            (Value::Object(actual_obj), Value::Object(expected_obj))
        }
        DiffTree::Array(children) => {
            let mut actual_arr = Vec::with_capacity(children.len());
            let mut expected_arr = Vec::with_capacity(children.len());
            for child in children {
                let (actual_value, expected_value) = rebuild_node(child, errors);
                actual_arr.push(actual_value);
                expected_arr.push(expected_value);
            }
            (Value::Array(actual_arr), Value::Array(expected_arr))
        }
        DiffTree::Leaf(Ok(value)) => (value.clone(), value.clone()),
        DiffTree::Leaf(Err(mismatch)) => {
            let rendered = render_mismatch(mismatch);
            errors.push(mismatch.clone());
            rendered
        }
    }
}

/// Splits one mismatch into its `(actual, expected)` display pair. Class
/// sentinels (`KeyNotFound`, `UnexpectedKey`, `IndexNotFound`,
/// `UnexpectedIndex`) substitute their class name on the side that has no
/// value (the side where the key/index doesn't exist) and show the real
/// sibling value on the other, so the rendered diff still reveals what
/// changed; every other variant already carries the real values to show.
fn render_mismatch(mismatch: &Mismatch) -> (Value, Value) {
    match mismatch {
        Mismatch::KeyNotFound(expected) => (Value::String("KeyNotFound".into()), expected.clone()),
        Mismatch::UnexpectedKey(actual) => (actual.clone(), Value::String("UnexpectedKey".into())),
        Mismatch::IndexNotFound(expected) => (Value::String("IndexNotFound".into()), expected.clone()),
        Mismatch::UnexpectedIndex(actual) => (actual.clone(), Value::String("UnexpectedIndex".into())),
        Mismatch::Difference { actual, expected } => (actual.clone(), expected.clone()),
        Mismatch::RegexNotMatched { actual, pattern } => {
            (actual.clone(), Value::String(pattern.clone()))
        }
        Mismatch::TypeNotMatched { actual, expected } => (actual.clone(), expected.clone()),
        Mismatch::NumberNotMatched {
            actual,
            expected,
            min,
            max,
        } => {
            let min_text = min.map_or_else(|| "None".to_string(), |m| m.to_string());
            let max_text = max.map_or_else(|| "None".to_string(), |m| m.to_string());
            let rendered = format!("NumberNotMatched(min={min_text}, max={max_text}, {actual})");
            (Value::String(rendered), expected.clone())
        }
    }
}
