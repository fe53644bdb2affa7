use serde_json::Value;
use tracing::debug;

use crate::payload::{ReviewPayload, ReviewVerdict};

/// Keys under which frameworks nest an already-decoded verdict object
const NESTED_OBJECT_KEYS: &[&str] = &["json", "json_dict", "data", "output", "result"];

/// Keys under which frameworks nest the raw model text
const NESTED_TEXT_KEYS: &[&str] = &["raw", "text", "content", "output"];

/// Normalize an arbitrarily-shaped reviewer response into a verdict.
///
/// Total function: every failure path degrades to an empty verdict,
/// which callers treat as a revise. Strategies are tried in order and
/// the first that yields a verdict wins.
pub fn extract_verdict(payload: &ReviewPayload) -> ReviewVerdict {
    let verdict = match payload {
        ReviewPayload::Structured(verdict) => Some(verdict.clone()),
        ReviewPayload::Json(value) => verdict_from_value(value),
        ReviewPayload::Text(text) => parse_json_text(text).and_then(|v| verdict_from_value(&v)),
    };

    match verdict {
        Some(v) => v,
        None => {
            debug!("No verdict found in reviewer payload");
            ReviewVerdict::empty()
        }
    }
}

/// Read a verdict out of a decoded JSON value, recursing into known
/// wrapper keys when the fields are not at the top level.
fn verdict_from_value(value: &Value) -> Option<ReviewVerdict> {
    let object = value.as_object()?;

    // Direct structured fields
    if let Some(verdict) = object.get("verdict") {
        let feedback = object.get("feedback").map(value_to_text).unwrap_or_default();
        return Some(ReviewVerdict::new(
            value_to_text(verdict),
            feedback.trim().to_string(),
        ));
    }

    // Nested decoded object under an alternate key
    for key in NESTED_OBJECT_KEYS {
        if let Some(inner @ Value::Object(_)) = object.get(*key) {
            if let Some(verdict) = verdict_from_value(inner) {
                return Some(verdict);
            }
        }
    }

    // Nested raw text that itself contains JSON
    for key in NESTED_TEXT_KEYS {
        if let Some(Value::String(text)) = object.get(*key) {
            if let Some(parsed) = parse_json_text(text) {
                if let Some(verdict) = verdict_from_value(&parsed) {
                    return Some(verdict);
                }
            }
        }
    }

    None
}

/// Render a JSON value as plain text, unquoting strings
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse model text as JSON, forgiving code fences and surrounding prose.
///
/// Direct parse first, then the first balanced `{...}` substring.
fn parse_json_text(text: &str) -> Option<Value> {
    let cleaned = strip_code_fences(text.trim());

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Some(value);
    }

    let candidate = first_balanced_object(cleaned)?;
    serde_json::from_str::<Value>(candidate).ok()
}

/// Remove leading/trailing triple-backtick fences, tolerating a language
/// tag on the opening fence.
fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text;

    if cleaned.starts_with("```") {
        cleaned = match cleaned.find('\n') {
            Some(pos) => &cleaned[pos + 1..],
            None => cleaned.trim_start_matches('`'),
        };
    }

    let trimmed = cleaned.trim_end();
    if let Some(without) = trimmed.strip_suffix("```") {
        cleaned = without;
    }

    cleaned.trim()
}

/// Find the first balanced top-level `{...}` substring, ignoring braces
/// inside JSON string literals.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_payload_passes_through() {
        let payload = ReviewPayload::Structured(ReviewVerdict::new("approve", "looks good"));
        let verdict = extract_verdict(&payload);
        assert!(verdict.is_approve());
        assert_eq!(verdict.feedback, "looks good");
    }

    #[test]
    fn test_direct_json_fields() {
        let payload = ReviewPayload::Json(json!({"verdict": "revise", "feedback": "fix loop"}));
        let verdict = extract_verdict(&payload);
        assert_eq!(verdict.verdict, "revise");
        assert_eq!(verdict.feedback, "fix loop");
        assert!(!verdict.is_approve());
    }

    #[test]
    fn test_nested_decoded_object() {
        let payload = ReviewPayload::Json(json!({
            "json_dict": {"verdict": "approve", "feedback": ""}
        }));
        let verdict = extract_verdict(&payload);
        assert!(verdict.is_approve());
        assert_eq!(verdict.feedback, "");
    }

    #[test]
    fn test_nested_raw_text_with_prose() {
        let payload = ReviewPayload::Json(json!({
            "raw": "prefix text {\"verdict\":\"revise\",\"feedback\":\"fix loop\"} suffix"
        }));
        let verdict = extract_verdict(&payload);
        assert_eq!(verdict.verdict, "revise");
        assert_eq!(verdict.feedback, "fix loop");
    }

    #[test]
    fn test_fenced_json_text() {
        let payload = ReviewPayload::Text(
            "```json\n{\"verdict\":\"approve\",\"feedback\":\"\"}\n```".to_string(),
        );
        let verdict = extract_verdict(&payload);
        assert_eq!(verdict.verdict, "approve");
        assert_eq!(verdict.feedback, "");
    }

    #[test]
    fn test_plain_json_text() {
        let payload =
            ReviewPayload::Text(r#"{"verdict": "APPROVE", "feedback": "ship it"}"#.to_string());
        let verdict = extract_verdict(&payload);
        assert!(verdict.is_approve());
        assert_eq!(verdict.normalized_verdict(), "approve");
    }

    #[test]
    fn test_unparsable_text_degrades_to_empty() {
        let payload = ReviewPayload::Text("no json object anywhere here".to_string());
        let verdict = extract_verdict(&payload);
        assert_eq!(verdict, ReviewVerdict::empty());
        assert!(!verdict.is_approve());
    }

    #[test]
    fn test_non_object_json_yields_empty() {
        let payload = ReviewPayload::Text("[1, 2, 3]".to_string());
        assert_eq!(extract_verdict(&payload), ReviewVerdict::empty());
    }

    #[test]
    fn test_case_insensitive_approval() {
        for tag in ["approve", "Approve", "APPROVE"] {
            let verdict = ReviewVerdict::new(tag, "");
            assert!(verdict.is_approve(), "{tag} should approve");
        }
        for tag in ["REVISE", "reject", "", "approved"] {
            let verdict = ReviewVerdict::new(tag, "");
            assert!(!verdict.is_approve(), "{tag} should not approve");
        }
    }

    #[test]
    fn test_balanced_object_ignores_braces_in_strings() {
        let text = r#"note: {"verdict":"revise","feedback":"use {} literals"} done"#;
        let found = first_balanced_object(text).unwrap();
        let value: serde_json::Value = serde_json::from_str(found).unwrap();
        assert_eq!(value["feedback"], "use {} literals");
    }

    #[test]
    fn test_balanced_object_handles_nesting() {
        let text = r#"prefix {"outer": {"verdict": "revise"}, "verdict": "approve"} suffix"#;
        let payload = ReviewPayload::Text(text.to_string());
        let verdict = extract_verdict(&payload);
        assert!(verdict.is_approve());
    }

    #[test]
    fn test_unterminated_object_yields_empty() {
        let payload = ReviewPayload::Text(r#"{"verdict": "approve""#.to_string());
        assert_eq!(extract_verdict(&payload), ReviewVerdict::empty());
    }

    #[test]
    fn test_non_string_verdict_is_stringified() {
        let payload = ReviewPayload::Json(json!({"verdict": 1, "feedback": "odd"}));
        let verdict = extract_verdict(&payload);
        assert_eq!(verdict.verdict, "1");
        assert!(!verdict.is_approve());
    }

    #[test]
    fn test_fence_without_language_tag() {
        let payload =
            ReviewPayload::Text("```\n{\"verdict\":\"revise\",\"feedback\":\"x\"}\n```".into());
        let verdict = extract_verdict(&payload);
        assert_eq!(verdict.verdict, "revise");
    }
}
