//! Parsing and formatting of research findings.
//!
//! Tool results carry sources as a JSON array; the researcher parses them on
//! each continued iteration and formats the accumulated set into a synthesis
//! report when the iteration cap is reached.

use serde_json::Value;

use crate::agent::prompts::RESEARCH_SYNTHESIS_TEMPLATE;
use crate::state::{Source, SourceType};

/// Error for malformed research results.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid JSON in research results: {0}")]
    InvalidJson(String),
    #[error("expected list of sources, got {0}")]
    NotAList(String),
    #[error("source at index {index}: {reason}")]
    BadSource { index: usize, reason: String },
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn validate_source(item: &Value, index: usize) -> Result<Source, ValidationError> {
    let obj = item.as_object().ok_or_else(|| ValidationError::BadSource {
        index,
        reason: format!("not an object, got {}", value_kind(item)),
    })?;

    for field in ["source", "content", "type"] {
        if !obj.contains_key(field) {
            return Err(ValidationError::BadSource {
                index,
                reason: format!("missing field: {}", field),
            });
        }
    }

    let source = obj["source"]
        .as_str()
        .ok_or_else(|| ValidationError::BadSource {
            index,
            reason: "'source' must be string".to_string(),
        })?;
    let content = obj["content"]
        .as_str()
        .ok_or_else(|| ValidationError::BadSource {
            index,
            reason: "'content' must be string".to_string(),
        })?;
    let source_type = match obj["type"].as_str() {
        Some("web") => SourceType::Web,
        Some("document") => SourceType::Document,
        other => {
            return Err(ValidationError::BadSource {
                index,
                reason: format!("invalid type: {:?}", other),
            })
        }
    };

    Ok(Source {
        source: source.to_string(),
        content: content.to_string(),
        source_type,
    })
}

/// Parse a tool result into validated sources.
///
/// The input must be a JSON array of objects with `source`, `content`, and
/// `type` fields; any malformed entry fails the whole parse.
pub fn parse_research_results(results_str: &str) -> Result<Vec<Source>, ValidationError> {
    let parsed: Value = serde_json::from_str(results_str)
        .map_err(|e| ValidationError::InvalidJson(e.to_string()))?;

    let list = parsed
        .as_array()
        .ok_or_else(|| ValidationError::NotAList(value_kind(&parsed).to_string()))?;

    list.iter()
        .enumerate()
        .map(|(i, item)| validate_source(item, i))
        .collect()
}

fn format_single_source(idx: usize, source: &Source) -> String {
    let type_str = match source.source_type {
        SourceType::Web => "web",
        SourceType::Document => "document",
    };
    format!(
        "[Source {}]\nType: {}\nSource: {}\nContent: {}\n",
        idx + 1,
        type_str,
        source.source,
        source.content
    )
}

/// Format accumulated findings into the synthesis report handed back to the
/// orchestrator when the iteration cap is reached.
pub fn format_research_synthesis(findings: &[Source]) -> String {
    let formatted_sources = findings
        .iter()
        .enumerate()
        .map(|(i, s)| format_single_source(i, s))
        .collect::<Vec<_>>()
        .join("\n");

    RESEARCH_SYNTHESIS_TEMPLATE
        .replace("{total_sources}", &findings.len().to_string())
        .replace("{formatted_sources}", &formatted_sources)
}
