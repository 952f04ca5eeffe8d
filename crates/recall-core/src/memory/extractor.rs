//! Fact extraction via LLM.
//!
//! `FactExtractor` sends the latest user message to the LLM with a fixed
//! instruction prompt and parses a JSON object of the form
//! `{"facts": ["...", "..."]}` out of the response.
//!
//! Extraction is best-effort: any call or parse failure logs a warning and
//! returns an empty list. A failed extraction never blocks the turn.

use serde_json::Value;

use recall_types::llm::{CompletionRequest, Message};

use crate::llm::provider::LlmProvider;

/// Built-in instruction used when no prompt file is configured or readable.
pub const DEFAULT_FACT_PROMPT: &str = r#"You are an information extractor. Given the user's latest message, extract facts worth remembering long-term (name, preferences, habits, important settings).

Output strict JSON with a single key "facts" mapping to an array of strings. Example:
{"facts": ["The user's name is Alex", "The user's hobby is basketball"]}

If there is nothing worth remembering, output: {"facts": []}"#;

/// Extracts long-term facts from user messages with a fixed instruction prompt.
///
/// The instruction is loaded once at startup (file-backed with a built-in
/// fallback) and held immutably here.
pub struct FactExtractor {
    instruction: String,
}

impl FactExtractor {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Extract facts from the user's message.
    ///
    /// Sends [system: instruction] + [user: raw message] at temperature 0.0
    /// and parses the response. Returns an empty list on any failure.
    pub async fn extract<P: LlmProvider>(
        &self,
        provider: &P,
        model: &str,
        user_text: &str,
    ) -> Vec<String> {
        let request = CompletionRequest {
            model: model.to_string(),
            messages: vec![Message::user(user_text)],
            system: Some(self.instruction.clone()),
            temperature: Some(0.0),
        };

        match provider.complete(&request).await {
            Ok(response) => parse_facts(&response.content),
            Err(e) => {
                tracing::warn!(error = %e, "fact extraction call failed; skipping");
                Vec::new()
            }
        }
    }
}

/// Parse the `facts` array out of an LLM response.
///
/// Accepts either a direct JSON object or, when direct parsing fails, the
/// first `{...}` substring (first `{` to last `}`). Entries are coerced to
/// strings, trimmed, empties dropped, and deduplicated preserving order.
/// Anything unparseable yields an empty list.
pub fn parse_facts(content: &str) -> Vec<String> {
    let Some(data) = salvage_json_object(content) else {
        tracing::warn!(
            preview = preview(content),
            "fact extraction response is not a JSON object; skipping"
        );
        return Vec::new();
    };

    let Some(facts) = data.get("facts").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = Vec::new();
    for entry in facts {
        let text = match entry {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        if !text.is_empty() && !seen.contains(&text) {
            seen.push(text);
        }
    }
    seen
}

/// First ~200 bytes of `text` for log output, truncated on a char boundary.
fn preview(text: &str) -> &str {
    let mut end = text.len().min(200);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Parse `text` as JSON, falling back to the substring spanning the first
/// `{` through the last `}`.
fn salvage_json_object(text: &str) -> Option<Value> {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facts_well_formed() {
        let content = r#"{"facts": ["The user's name is Alex", "Likes tea"]}"#;
        assert_eq!(
            parse_facts(content),
            vec!["The user's name is Alex", "Likes tea"]
        );
    }

    #[test]
    fn test_parse_facts_trims_and_drops_empties() {
        let content = r#"{"facts": ["  padded  ", "", "   "]}"#;
        assert_eq!(parse_facts(content), vec!["padded"]);
    }

    #[test]
    fn test_parse_facts_dedupes_preserving_order() {
        let content = r#"{"facts": ["a", "b", "a", "c", "b"]}"#;
        assert_eq!(parse_facts(content), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_facts_salvages_from_fenced_output() {
        let content = "Sure, here you go:\n```json\n{\"facts\": [\"x\"]}\n```";
        assert_eq!(parse_facts(content), vec!["x"]);
    }

    #[test]
    fn test_parse_facts_coerces_scalars_skips_nested() {
        let content = r#"{"facts": [42, true, ["nested"], {"k": 1}, "y"]}"#;
        assert_eq!(parse_facts(content), vec!["42", "true", "y"]);
    }

    #[test]
    fn test_parse_facts_malformed_returns_empty() {
        assert!(parse_facts("not json at all").is_empty());
        assert!(parse_facts("").is_empty());
        assert!(parse_facts("} backwards {").is_empty());
    }

    #[test]
    fn test_parse_facts_long_multibyte_reply_with_subscriber() {
        // The warning path logs a truncated preview; with an active
        // subscriber the field expression is evaluated, so a long CJK reply
        // must not split a character mid-byte.
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .try_init();
        let content = "好".repeat(100);
        assert!(parse_facts(&content).is_empty());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "好".repeat(100);
        let cut = preview(&text);
        assert!(cut.len() <= 200);
        assert!(text.is_char_boundary(cut.len()));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_parse_facts_missing_or_wrong_key_returns_empty() {
        assert!(parse_facts(r#"{"notes": ["a"]}"#).is_empty());
        assert!(parse_facts(r#"{"facts": "not an array"}"#).is_empty());
        assert!(parse_facts(r#"["a", "b"]"#).is_empty());
    }

    #[test]
    fn test_default_prompt_describes_contract() {
        assert!(DEFAULT_FACT_PROMPT.contains("\"facts\""));
        assert!(DEFAULT_FACT_PROMPT.contains("array of strings"));
    }
}
