//! Recursive string sanitization
//!
//! Applied to outgoing bodies and queries before transmission. This is
//! defense in depth, not a substitute for endpoint-side escaping.

use serde_json::Value;

const STRIPPED: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Strips `<>"'&` and control characters from every string leaf of a
/// JSON-like value, recursively. Object keys and non-string leaves pass
/// through untouched.
#[must_use]
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(sanitize_str(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), sanitize_value(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn sanitize_str(s: &str) -> String {
    s.chars()
        .filter(|c| !STRIPPED.contains(c) && !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_strips_markup_characters() {
        let input = json!({"a": "<b>x</b>", "c": [1, "y&z"]});
        let expected = json!({"a": "bx/b", "c": [1, "yz"]});
        assert_eq!(sanitize_value(&input), expected);
    }

    #[test]
    fn test_strips_control_characters() {
        let input = json!("line1\nline2\u{7}");
        assert_eq!(sanitize_value(&input), json!("line1line2"));
    }

    #[test]
    fn test_leaves_non_strings_untouched() {
        let input = json!({"n": 42, "b": true, "x": null, "f": 1.5});
        assert_eq!(sanitize_value(&input), input);
    }

    #[test]
    fn test_nested_recursion() {
        let input = json!({"outer": {"inner": ["<script>", {"deep": "a'b"}]}});
        let expected = json!({"outer": {"inner": ["script", {"deep": "ab"}]}});
        assert_eq!(sanitize_value(&input), expected);
    }
}
