//! Tool surface: specs, results, errors, the `Tool` trait, and implementations.
//!
//! The researcher binds tool specs into its LLM calls; the tool node looks the
//! requested tool up in a `ToolRegistry` and executes it.

mod registry;
mod research;
mod r#trait;
mod web_search;

pub use r#trait::Tool;
pub use registry::ToolRegistry;
pub use research::{research_subagent_spec, ResearchSubAgentTool, RESEARCH_TOOL_NAME};
pub use web_search::WebSearchTool;

use serde_json::Value;

use crate::config::EnvConfig;

/// The default tool set: Tavily web search plus the research delegation handoff.
pub fn default_registry(env: &EnvConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WebSearchTool::new(&env.tavily_api_key)));
    registry.register(Box::new(ResearchSubAgentTool));
    registry
}

/// Description of one callable tool (name, description, JSON Schema for input).
///
/// **Interaction**: Bound into LLM calls via `LlmClient::invoke_with_tools`;
/// produced by `Tool::spec` and `ToolRegistry::list`.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Unique tool name the model uses in tool_calls.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: Option<String>,
    /// JSON Schema for the tool's arguments.
    pub input_schema: Value,
}

/// Result content of a tool call (plain text).
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    pub text: String,
}

/// Error type for tool lookup and execution.
#[derive(Debug, thiserror::Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("transport: {0}")]
    Transport(String),
}
