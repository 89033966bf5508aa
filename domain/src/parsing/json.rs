//! Structured JSON extraction from free-form LLM responses.
//!
//! Models are asked to answer with JSON but routinely wrap it in prose or
//! markdown fences. These functions recover the embedded value:
//!
//! | Function | Returns |
//! |----------|---------|
//! | [`extract_value`] | first parseable top-level object, else first array |
//! | [`extract`] | the same value deserialized into `T` |
//! | [`missing_required_keys`] | top-level keys absent from an extracted value |
//!
//! Extraction never panics and never validates a schema; callers check the
//! shape they need.
//!
//! # Examples
//!
//! ```
//! use tribunal_domain::parsing::json::extract_value;
//!
//! let text = "Sure! Here is the analysis:\n```json\n{\"score\": 7}\n```";
//! assert_eq!(extract_value(text), Some(serde_json::json!({"score": 7})));
//! assert_eq!(extract_value("no json here"), None);
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract the first JSON object (or, failing that, array) embedded in `text`.
pub fn extract_value(text: &str) -> Option<Value> {
    first_parseable_span(text, b'{', b'}').or_else(|| first_parseable_span(text, b'[', b']'))
}

/// Extract the embedded JSON value and deserialize it into `T`.
///
/// Returns `None` when no JSON is found or when it does not fit `T`.
pub fn extract<T: DeserializeOwned>(text: &str) -> Option<T> {
    extract_value(text).and_then(|value| serde_json::from_value(value).ok())
}

/// List the `required` top-level keys missing from `value`.
///
/// Keys holding `null` count as missing. A non-object value misses every key.
pub fn missing_required_keys(value: &Value, required: &[&str]) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return required.iter().map(|k| k.to_string()).collect();
    };

    required
        .iter()
        .filter(|key| object.get(**key).is_none_or(Value::is_null))
        .map(|key| key.to_string())
        .collect()
}

/// Scan top-level `open`..`close` spans left to right; return the first that parses.
///
/// A span that fails to parse is skipped whole, so values nested inside it
/// are never candidates. An unclosed `open` ends the scan.
fn first_parseable_span(text: &str, open: u8, close: u8) -> Option<Value> {
    let bytes = text.as_bytes();
    let mut cursor = 0;

    while let Some(offset) = bytes[cursor..].iter().position(|b| *b == open) {
        let start = cursor + offset;
        let end = balanced_end(bytes, start, open, close)?;
        // `open`/`close` are ASCII, so both indices sit on char boundaries.
        if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
            return Some(value);
        }
        cursor = end + 1;
    }

    None
}

/// Index of the `close` byte matching the `open` byte at `start`.
///
/// Delimiters inside string literals (including escaped quotes) are ignored.
fn balanced_end(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        if b == b'"' {
            in_string = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(start + offset);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_plain_object() {
        assert_eq!(
            extract_value(r#"{"main_pain": "time"}"#),
            Some(json!({"main_pain": "time"}))
        );
    }

    #[test]
    fn test_object_in_markdown_fence() {
        let text = r#"
Here is my evaluation:
```json
{"pains": ["cost", "time", "variety"], "score": 7}
```
Let me know if you need more.
"#;
        assert_eq!(
            extract_value(text),
            Some(json!({"pains": ["cost", "time", "variety"], "score": 7}))
        );
    }

    #[test]
    fn test_nested_object_and_trailing_prose_with_braces() {
        let text = r#"Result: {"a": {"b": [1, 2]}, "c": "x"} and also {not json}"#;
        assert_eq!(extract_value(text), Some(json!({"a": {"b": [1, 2]}, "c": "x"})));
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"{"note": "use } and { freely", "quote": "say \"}\""}"#;
        assert_eq!(
            extract_value(text),
            Some(json!({"note": "use } and { freely", "quote": "say \"}\""}))
        );
    }

    #[test]
    fn test_unparseable_top_level_span_falls_through_to_next_sibling() {
        let text = r#"Template {placeholder} then {"ok": true}"#;
        assert_eq!(extract_value(text), Some(json!({"ok": true})));
    }

    #[test]
    fn test_invalid_outer_object_does_not_yield_inner_object() {
        assert_eq!(extract_value(r#"{"a": {"b": 1}, oops}"#), None);
        assert_eq!(
            extract_value(r#"Verdict: {"judgment": {"verdict": "go"}, missing quotes}"#),
            None
        );
    }

    #[test]
    fn test_invalid_outer_object_still_falls_back_to_array() {
        let text = r#"{"a": {"b": 1}, oops} but the list is ["x", "y"]"#;
        assert_eq!(extract_value(text), Some(json!(["x", "y"])));
    }

    #[test]
    fn test_unclosed_brace_hides_nested_objects() {
        assert_eq!(extract_value(r#"{ "draft": {"k": 1} never closed"#), None);
    }

    #[test]
    fn test_many_unmatched_braces_terminate() {
        let text = "{".repeat(20_000);
        assert_eq!(extract_value(&text), None);
    }

    #[test]
    fn test_array_fallback() {
        let text = "Top ideas:\n[\"meal kits\", \"grocery sync\"]";
        assert_eq!(extract_value(text), Some(json!(["meal kits", "grocery sync"])));
    }

    #[test]
    fn test_object_preferred_over_earlier_array() {
        let text = r#"[1, 2] then {"k": 1}"#;
        assert_eq!(extract_value(text), Some(json!({"k": 1})));
    }

    #[test]
    fn test_no_json_returns_none() {
        assert_eq!(extract_value(""), None);
        assert_eq!(extract_value("I could not produce an analysis."), None);
        assert_eq!(extract_value("{ unterminated"), None);
        assert_eq!(extract_value("}{]["), None);
    }

    #[test]
    fn test_non_ascii_text_does_not_panic() {
        let text = "Análisis — résumé: {\"título\": \"café ☕\"} 日本語";
        assert_eq!(extract_value(text), Some(json!({"título": "café ☕"})));
    }

    #[test]
    fn test_extracted_values_roundtrip() {
        let inputs = [
            r#"prefix {"x": [1, {"y": null}], "z": 1.5} suffix"#,
            "```\n[true, false, \"a\"]\n```",
            r#"{"deep": {"deeper": {"deepest": "ok"}}}"#,
        ];
        for input in inputs {
            let value = extract_value(input).unwrap();
            let reparsed: Value =
                serde_json::from_str(&serde_json::to_string(&value).unwrap()).unwrap();
            assert_eq!(value, reparsed);
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pains {
        pains: Vec<String>,
    }

    #[test]
    fn test_typed_extract() {
        let text = r#"Answer: {"pains": ["a", "b"]}"#;
        assert_eq!(
            extract::<Pains>(text),
            Some(Pains {
                pains: vec!["a".into(), "b".into()]
            })
        );
        assert_eq!(extract::<Pains>(r#"{"other": 1}"#), None);
    }

    #[test]
    fn test_missing_required_keys() {
        let value = json!({"verdict": "go", "confidence": null});
        assert_eq!(
            missing_required_keys(&value, &["verdict", "confidence", "main_pain"]),
            vec!["confidence".to_string(), "main_pain".to_string()]
        );
        assert!(missing_required_keys(&value, &["verdict"]).is_empty());
        assert_eq!(
            missing_required_keys(&json!([1, 2]), &["verdict"]),
            vec!["verdict".to_string()]
        );
    }
}
