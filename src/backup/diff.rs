//! Change-message formatting for tracked settings
//!
//! Generates the human-readable transition messages the store logs when a
//! tracked setting changes value.

use serde_json::Value;

/// Describe a single setting transition, e.g. `option2: "val2" -> 150`
///
/// `before` is `None` when the key had no previously recorded value.
pub fn format_transition(key: &str, before: Option<&Value>, after: &Value) -> String {
    match before {
        Some(before) => format!(
            "{}: {} -> {}",
            key,
            format_value(before),
            format_value(after)
        ),
        None => format!("{}: (unset) -> {}", key, format_value(after)),
    }
}

/// Format a JSON value for human-readable display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.len() > 50 {
                format!("\"{}...\"", &s[..47])
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
