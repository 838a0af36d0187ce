//! Transcript extraction from raw SDK `message` payloads.
//!
//! The SDK's `message` event carries several payload shapes; only
//! `{type: "transcript", transcript: "..."}` produces a transcript line.
//! Everything else is silently ignored.

use serde_json::Value;

use crate::types::Role;

/// Extracts `(role, text)` from a `message` payload.
///
/// Returns `Some` iff `type` is exactly `"transcript"` and `transcript` is a
/// non-empty string. The role defaults to [`Role::User`] unless the payload
/// role is exactly `"assistant"`.
pub fn parse_transcript(payload: &Value) -> Option<(Role, String)> {
    if payload.get("type").and_then(Value::as_str) != Some("transcript") {
        return None;
    }

    let text = payload.get("transcript").and_then(Value::as_str)?;
    if text.is_empty() {
        return None;
    }

    let role = Role::from_payload(payload.get("role").and_then(Value::as_str));
    Some((role, text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_transcript() {
        let payload = json!({
            "type": "transcript",
            "role": "assistant",
            "transcript": "hello"
        });
        assert_eq!(
            parse_transcript(&payload),
            Some((Role::Assistant, "hello".to_string()))
        );
    }

    #[test]
    fn unknown_role_maps_to_user() {
        let payload = json!({
            "type": "transcript",
            "role": "speaker-3",
            "transcript": "hi"
        });
        assert_eq!(
            parse_transcript(&payload),
            Some((Role::User, "hi".to_string()))
        );
    }

    #[test]
    fn missing_role_maps_to_user() {
        let payload = json!({ "type": "transcript", "transcript": "hi" });
        assert_eq!(
            parse_transcript(&payload),
            Some((Role::User, "hi".to_string()))
        );
    }

    #[test]
    fn non_transcript_type_ignored() {
        let payload = json!({ "type": "status-update", "transcript": "hi" });
        assert_eq!(parse_transcript(&payload), None);
    }

    #[test]
    fn missing_transcript_field_ignored() {
        let payload = json!({ "type": "transcript", "role": "assistant" });
        assert_eq!(parse_transcript(&payload), None);
    }

    #[test]
    fn empty_transcript_ignored() {
        let payload = json!({ "type": "transcript", "transcript": "" });
        assert_eq!(parse_transcript(&payload), None);
    }

    #[test]
    fn non_string_transcript_ignored() {
        let payload = json!({ "type": "transcript", "transcript": 42 });
        assert_eq!(parse_transcript(&payload), None);
    }

    #[test]
    fn non_object_payload_ignored() {
        assert_eq!(parse_transcript(&json!("transcript")), None);
        assert_eq!(parse_transcript(&json!(null)), None);
    }
}
