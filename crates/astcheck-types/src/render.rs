//! Depth-bounded pretty printer.
//!
//! Whole ASTs can run to megabytes, so diagnostics render a subtree only a
//! few levels deep. Containers at or beyond `max_depth` collapse to a
//! summary such as `{...3 keys}` or `[...12 items]`; scalars always print.

use crate::value::TreeValue;

const INDENT: &str = "  ";

/// Render `value` as indented JSON-like text, expanding containers whose
/// nesting level (root = 0) is below `max_depth`.
pub fn render(value: &TreeValue, max_depth: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0, max_depth);
    out
}

fn write_value(out: &mut String, value: &TreeValue, level: usize, max_depth: usize) {
    match value {
        TreeValue::Mapping(entries) if entries.is_empty() => out.push_str("{}"),
        TreeValue::Sequence(items) if items.is_empty() => out.push_str("[]"),
        TreeValue::Mapping(entries) if level >= max_depth => {
            out.push_str(&format!("{{...{}}}", count(entries.len(), "key", "keys")));
        }
        TreeValue::Sequence(items) if level >= max_depth => {
            out.push_str(&format!("[...{}]", count(items.len(), "item", "items")));
        }
        TreeValue::Mapping(entries) => {
            out.push_str("{\n");
            for (i, (key, child)) in entries.iter().enumerate() {
                push_indent(out, level + 1);
                out.push_str(&quote(key));
                out.push_str(": ");
                write_value(out, child, level + 1, max_depth);
                if i + 1 < entries.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, level);
            out.push('}');
        }
        TreeValue::Sequence(items) => {
            out.push_str("[\n");
            for (i, child) in items.iter().enumerate() {
                push_indent(out, level + 1);
                write_value(out, child, level + 1, max_depth);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, level);
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

fn quote(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("{key:?}"))
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {one}")
    } else {
        format!("{n} {many}")
    }
}
