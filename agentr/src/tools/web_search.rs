//! Web search tool backed by the Tavily search API.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::state::Source;
use crate::tools::r#trait::Tool;
use crate::tools::{ToolCallContent, ToolSourceError, ToolSpec};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
const QUERY_MAX_CHARS: usize = 500;

fn tavily_search_url() -> String {
    std::env::var("TAVILY_SEARCH_URL").unwrap_or_else(|_| TAVILY_SEARCH_URL.to_string())
}

/// Searches the web via Tavily and returns sources as a JSON array string.
///
/// The text handed back to the model is `[{"source": url, "content": text,
/// "type": "web"}, ...]` so the researcher can cite and the agent can collect
/// `Source` entries from tool output.
///
/// **Interaction**: Registered as `web_search` in the `ToolRegistry`; executed
/// by the tool node.
pub struct WebSearchTool {
    api_key: String,
}

impl WebSearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

/// Convert a Tavily response body into `Source` entries.
///
/// Missing `url`/`content` fields become empty strings; a missing or
/// non-array `results` yields no sources.
pub(crate) fn format_tavily_response(response: &Value) -> Vec<Source> {
    let results = match response.get("results").and_then(|r| r.as_array()) {
        Some(list) => list,
        None => return Vec::new(),
    };
    results
        .iter()
        .map(|item| {
            Source::web(
                item.get("url").and_then(|u| u.as_str()).unwrap_or(""),
                item.get("content").and_then(|c| c.as_str()).unwrap_or(""),
            )
        })
        .collect()
}

async fn tavily_search_request(api_key: &str, query: &str) -> Result<Value, ToolSourceError> {
    let client = reqwest::Client::new();
    let res = client
        .post(tavily_search_url())
        .json(&json!({
            "api_key": api_key,
            "query": query,
        }))
        .send()
        .await
        .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
    if !res.status().is_success() {
        let status = res.status();
        let err_body = res.text().await.unwrap_or_default();
        return Err(ToolSourceError::Transport(format!(
            "Tavily API error {}: {}",
            status, err_body
        )));
    }
    res.json()
        .await
        .map_err(|e| ToolSourceError::Transport(e.to_string()))
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "web_search".to_string(),
            description: Some(
                "Search the web for up-to-date information. Returns results with source URLs."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query",
                        "minLength": 1,
                        "maxLength": QUERY_MAX_CHARS,
                    }
                },
                "required": ["query"],
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = args
            .get("query")
            .and_then(|q| q.as_str())
            .ok_or_else(|| ToolSourceError::InvalidInput("query is required".to_string()))?;
        if query.is_empty() || query.chars().count() > QUERY_MAX_CHARS {
            return Err(ToolSourceError::InvalidInput(format!(
                "query must be 1..={} characters",
                QUERY_MAX_CHARS
            )));
        }

        debug!(query = %query.chars().take(50).collect::<String>(), "web search");
        let response = tavily_search_request(&self.api_key, query).await?;
        let sources = format_tavily_response(&response);
        debug!(count = sources.len(), "web search sources");

        let text = serde_json::to_string(&sources)
            .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
        Ok(ToolCallContent { text })
    }
}
