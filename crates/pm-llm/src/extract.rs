//! Locate and parse the JSON object inside free-form model output.
//!
//! Models wrap their answer in prose, in a fenced block, or both. Strategy:
//! 1. the first ```` ```json ```` fenced block, if closed
//! 2. otherwise the widest `{ ... }` span (first `{` to last `}`)
//!
//! Whichever candidate is chosen must parse as a JSON object; there is no
//! fallback from a malformed fenced block to the brace span.

use serde_json::Value;

use crate::error::ParseError;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Extract the JSON object from model output.
///
/// # Errors
///
/// Returns [`ParseError`] when no candidate span exists, the candidate is
/// malformed JSON, or it parses to something other than an object.
pub fn extract_json(text: &str) -> Result<Value, ParseError> {
    let candidate = fenced_block(text)
        .or_else(|| brace_span(text))
        .ok_or_else(|| ParseError::new("no JSON object found in response"))?;

    let value: Value = serde_json::from_str(candidate).map_err(|e| {
        tracing::debug!(error = %e, candidate_length = candidate.len(), "Model output is not valid JSON");
        ParseError::new(e.to_string())
    })?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(ParseError::new("response JSON is not an object"))
    }
}

/// Contents of the first closed ```` ```json ```` block, without the
/// optional newlines right inside the fences.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &text[start..];
    let end = rest.find(FENCE_CLOSE)?;

    let body = &rest[..end];
    let body = body.strip_prefix('\n').unwrap_or(body);
    Some(body.strip_suffix('\n').unwrap_or(body))
}

/// Greedy span from the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fenced_and_bare_objects_extract_identically() {
        let fenced = extract_json("```json\n{\"a\":1}\n```").unwrap();
        let bare = extract_json("prefix {\"a\":1} suffix").unwrap();

        assert_eq!(fenced, json!({ "a": 1 }));
        assert_eq!(bare, fenced);
    }

    #[test]
    fn fence_with_surrounding_prose() {
        let text = "Here is the post-mortem:\n```json\n{\"root_cause\": \"disk full\"}\n```\nLet me know!";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({ "root_cause": "disk full" })
        );
    }

    #[test]
    fn fence_without_newlines() {
        assert_eq!(
            extract_json("```json{\"a\":[1,2]}```").unwrap(),
            json!({ "a": [1, 2] })
        );
    }

    #[test]
    fn greedy_span_covers_nested_objects() {
        let text = "Result: {\"impact\": {\"severity\": \"P1\"}, \"x\": {}} done";
        assert_eq!(
            extract_json(text).unwrap(),
            json!({ "impact": { "severity": "P1" }, "x": {} })
        );
    }

    #[test]
    fn unclosed_fence_falls_back_to_brace_span() {
        let text = "```json\n{\"a\":1}\n";
        assert_eq!(extract_json(text).unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn no_braces_is_parse_error() {
        let err = extract_json("I could not analyze this incident.").unwrap_err();
        assert_eq!(err.to_string(), "Invalid response format");
    }

    #[test]
    fn malformed_fenced_json_does_not_fall_back() {
        let text = "```json\n{\"a\": }\n```\n{\"b\": 2}";
        assert!(extract_json(text).is_err());
    }

    #[test]
    fn two_separate_objects_make_an_invalid_greedy_span() {
        assert!(extract_json("{\"a\":1} and {\"b\":2}").is_err());
    }

    #[test]
    fn reversed_braces_and_non_objects_are_rejected() {
        assert!(extract_json("} nothing {").is_err());
        assert!(extract_json("```json\n[1, 2, 3]\n```").is_err());
    }
}
