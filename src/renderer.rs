//! Pretty-prints actual/expected as sorted, indented JSON and emits a
//! colorized unified diff between them.

use serde::Serialize;
use serde_json::Value;
use similar::TextDiff;

const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0;m";

/// Controls the shape of the rendered unified diff.
#[derive(Debug, Clone, Copy)]
pub struct CompareOptions {
    /// Number of unchanged context lines around each hunk.
    pub context_radius: usize,
    /// Whether `+`/`-` lines get wrapped in SGR color escapes.
    pub colorize: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            context_radius: 3,
            colorize: true,
        }
    }
}

fn render_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .expect("serde_json::Value serialization is infallible");
    let mut text = String::from_utf8(buf).expect("serde_json output is always valid UTF-8");
    text.push('\n');
    text
}

fn colorize_line(line: &str) -> String {
    if line.starts_with("+++") || line.starts_with("---") || line.starts_with("@@") {
        line.to_string()
    } else if let Some(rest) = line.strip_prefix('+') {
        format!("{GREEN}+{rest}{RESET}")
    } else if let Some(rest) = line.strip_prefix('-') {
        format!("{RED}-{rest}{RESET}")
    } else {
        line.to_string()
    }
}

/// Renders the unified diff between `actual` and `expected` as a sequence
/// of lines (each including its own trailing newline), empty iff the two
/// serialize identically.
pub fn render_diff(actual: &Value, expected: &Value, options: &CompareOptions) -> impl Iterator<Item = String> {
    let actual_text = render_json(actual);
    let expected_text = render_json(expected);

    let mut lines = Vec::new();
    if actual_text != expected_text {
        let diff = TextDiff::from_lines(&actual_text, &expected_text);
        let unified = diff
            .unified_diff()
            .context_radius(options.context_radius)
            .header("actual", "expected")
            .to_string();
        for raw_line in unified.split_inclusive('\n') {
            lines.push(if options.colorize {
                colorize_line(raw_line)
            } else {
                raw_line.to_string()
            });
        }
    }
    lines.into_iter()
}
