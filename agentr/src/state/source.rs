//! Research source types: one piece of evidence collected by the researcher.

use serde::{Deserialize, Serialize};

/// Kind of information source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Result of a web search.
    Web,
    /// Local or uploaded document.
    Document,
}

/// One information source collected during research.
///
/// Serializes as `{"source": ..., "content": ..., "type": "web"|"document"}`;
/// the web_search tool returns a JSON array of these and the researcher parses
/// them back with [`parse_research_results`](crate::agent::parse_research_results).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Where the content came from (e.g. URL).
    pub source: String,
    /// Extracted content.
    pub content: String,
    /// Kind of source.
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

impl Source {
    /// Creates a web source from a URL and its extracted content.
    pub fn web(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            source_type: SourceType::Web,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: A Source serializes with a lowercase "type" field and round-trips.
    #[test]
    fn source_serde_uses_lowercase_type_tag() {
        let s = Source::web("https://example.com", "text");
        let json = serde_json::to_value(&s).expect("serialize");
        assert_eq!(json["type"], "web");
        assert_eq!(json["source"], "https://example.com");

        let back: Source = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.source_type, SourceType::Web);
        assert_eq!(back.content, "text");
    }

    /// **Scenario**: Unknown "type" values are rejected when deserializing.
    #[test]
    fn source_deserialize_rejects_unknown_type() {
        let json = r#"{"source": "s", "content": "c", "type": "video"}"#;
        assert!(serde_json::from_str::<Source>(json).is_err());
    }
}
