//! LLM client abstraction for the orchestrator and researcher nodes.
//!
//! Both nodes depend on a callable that returns assistant text and optional
//! tool_calls; this module defines the trait, the OpenAI-compatible client,
//! and a mock implementation for tests.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

/// Tool choice mode for chat completions: when tools are present, controls whether
/// the model may choose (auto), must not use (none), or must use (required).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolChoiceMode {
    /// Model can pick between message or tool calls. Default when tools are present.
    #[default]
    Auto,
    /// Model will not call any tool.
    None,
    /// Model must call one or more tools.
    Required,
}

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion: assistant message text and optional tool calls.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; the orchestrator and
/// researcher write `content` into a new assistant message and `tool_calls`
/// into `AgentState::tool_calls`.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Tool calls from this turn; empty means the model answered directly.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage for this call, when available.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// Plain assistant text with no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
            usage: None,
        }
    }

    /// Assistant turn carrying tool calls.
    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            usage: None,
        }
    }
}

/// LLM client: given messages, returns assistant text and optional tool_calls.
///
/// Implementations: `MockLlm` (scripted responses), `ChatOpenAI` (real API).
///
/// **Interaction**: Used by the orchestrator and researcher nodes; the nodes
/// bind their tool set per call via `invoke_with_tools`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages, return assistant content and optional tool_calls.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;

    /// Invoke with a bound tool set and a tool choice mode.
    ///
    /// Default implementation ignores the tools and delegates to `invoke()`,
    /// which is what scripted mocks want.
    async fn invoke_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        tool_choice: ToolChoiceMode,
    ) -> Result<LlmResponse, AgentError> {
        let _ = (tools, tool_choice);
        self.invoke(messages).await
    }
}
