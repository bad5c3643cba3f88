//! Coercion of terminal model output into the canonical result shape.
//!
//! Models end a run with anything from a well-formed JSON object to loose
//! prose, sometimes wrapped in a markdown fence. [`RawOutput`] classifies the
//! terminal payload once, and [`normalize`] is an explicit match over that
//! union. The coercion is idempotent: normalizing an already-normalized
//! result changes nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical research output: a prose report plus the source links used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// The compiled research findings
    pub research_data: String,

    /// Links to sources used in the research
    pub resource_links: Vec<String>,
}

/// Terminal model output before normalization.
#[derive(Debug, Clone)]
pub enum RawOutput {
    /// A decoded JSON object
    Structured(Map<String, Value>),

    /// Text known to hold a JSON-encoded object
    JsonText(String),

    /// Anything else
    FreeText(String),
}

impl RawOutput {
    /// Classify a terminal text payload.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match serde_json::from_str::<Value>(extract_json_body(&text)) {
            Ok(Value::Object(_)) => RawOutput::JsonText(text),
            _ => RawOutput::FreeText(text),
        }
    }

    /// Classify an arbitrary JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => RawOutput::Structured(map),
            Value::String(text) => RawOutput::from_text(text),
            other => RawOutput::FreeText(other.to_string()),
        }
    }
}

/// Strip a surrounding markdown code fence, if any, and trim whitespace.
pub(crate) fn extract_json_body(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Coerce terminal output into a [`ResearchResult`].
///
/// Precedence: a structured object passes through (missing fields filled with
/// defaults); JSON-encoded text is decoded and handled the same way; anything
/// else becomes the report text with no links. Duplicate links are merged,
/// keeping first-seen order.
pub fn normalize(raw: RawOutput) -> ResearchResult {
    match raw {
        RawOutput::Structured(map) => normalize_map(map),
        RawOutput::JsonText(text) => match serde_json::from_str::<Value>(extract_json_body(&text))
        {
            Ok(Value::Object(map)) => normalize_map(map),
            _ => wrap_text(text),
        },
        RawOutput::FreeText(text) => wrap_text(text),
    }
}

fn normalize_map(map: Map<String, Value>) -> ResearchResult {
    let research_data = match map.get("research_data") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let resource_links = match map.get("resource_links") {
        Some(Value::Array(items)) => dedupe_links(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string)),
        ),
        _ => Vec::new(),
    };

    ResearchResult {
        research_data,
        resource_links,
    }
}

fn wrap_text(text: String) -> ResearchResult {
    ResearchResult {
        research_data: text,
        resource_links: Vec::new(),
    }
}

fn dedupe_links(links: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links.filter(|link| seen.insert(link.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_raw(result: &ResearchResult) -> RawOutput {
        let value = serde_json::to_value(result).expect("result serializes");
        RawOutput::from_value(value)
    }

    #[test]
    fn structured_output_with_both_fields_passes_through() {
        let raw = RawOutput::from_value(json!({
            "research_data": "findings",
            "resource_links": ["https://a.example", "https://b.example"],
        }));

        let result = normalize(raw);
        assert_eq!(result.research_data, "findings");
        assert_eq!(
            result.resource_links,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn missing_fields_are_filled_with_defaults() {
        let result = normalize(RawOutput::from_value(json!({"resource_links": []})));
        assert_eq!(result.research_data, "");
        assert!(result.resource_links.is_empty());

        let result = normalize(RawOutput::from_text(r#"{"research_data": "x"}"#));
        assert_eq!(result.research_data, "x");
        assert!(result.resource_links.is_empty());
    }

    #[test]
    fn invalid_json_text_is_wrapped_as_research_data() {
        let result = normalize(RawOutput::from_text("not valid json"));
        assert_eq!(result.research_data, "not valid json");
        assert!(result.resource_links.is_empty());
    }

    #[test]
    fn json_encoded_text_is_decoded() {
        let text = r#"{"research_data": "report", "resource_links": ["https://a.example"]}"#;
        let result = normalize(RawOutput::from_text(text));
        assert_eq!(result.research_data, "report");
        assert_eq!(result.resource_links, vec!["https://a.example"]);
    }

    #[test]
    fn fenced_json_is_tolerated() {
        let text = "```json\n{\"research_data\": \"report\", \"resource_links\": []}\n```";
        let result = normalize(RawOutput::from_text(text));
        assert_eq!(result.research_data, "report");
    }

    #[test]
    fn non_object_json_is_treated_as_text() {
        let result = normalize(RawOutput::from_text("[1, 2, 3]"));
        assert_eq!(result.research_data, "[1, 2, 3]");
        assert!(result.resource_links.is_empty());
    }

    #[test]
    fn mistyped_links_are_dropped() {
        let raw = RawOutput::from_value(json!({
            "research_data": "findings",
            "resource_links": ["https://a.example", 42, null, {"url": "nope"}],
        }));
        assert_eq!(normalize(raw).resource_links, vec!["https://a.example"]);
    }

    #[test]
    fn duplicate_links_merge_preserving_first_seen_order() {
        let raw = RawOutput::from_value(json!({
            "research_data": "findings",
            "resource_links": [
                "https://b.example",
                "https://a.example",
                "https://b.example",
                "https://a.example",
            ],
        }));
        assert_eq!(
            normalize(raw).resource_links,
            vec!["https://b.example", "https://a.example"]
        );
    }

    #[test]
    fn normalization_is_idempotent_across_shapes() {
        let shapes = vec![
            RawOutput::from_value(json!({
                "research_data": "findings",
                "resource_links": ["https://a.example", "https://a.example"],
            })),
            RawOutput::from_text(r#"{"research_data": "x"}"#),
            RawOutput::from_text("not valid json"),
            RawOutput::from_text("No Topic Mentioned"),
            RawOutput::from_value(json!({"unexpected": true})),
        ];

        for raw in shapes {
            let once = normalize(raw);
            let twice = normalize(as_raw(&once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn no_topic_sentinel_is_ordinary_text() {
        let result = normalize(RawOutput::from_text("No Topic Mentioned"));
        assert_eq!(result.research_data, "No Topic Mentioned");
        assert!(result.resource_links.is_empty());
    }
}
