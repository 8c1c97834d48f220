//! Mock LLM for tests.
//!
//! Plays back a scripted queue of responses, one per invoke; when the script
//! runs out it returns a configurable fallback with no tool calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;

/// Mock LLM: scripted responses in call order.
///
/// Each `invoke` pops the next response from the script. Used to drive the
/// orchestrator/researcher loop deterministically in tests: delegation turns
/// return tool calls, synthesis turns return text.
///
/// **Interaction**: Implements `LlmClient`; used in node and graph tests.
pub struct MockLlm {
    script: Mutex<VecDeque<LlmResponse>>,
    fallback: String,
}

impl MockLlm {
    /// Scripted mock: responses are returned in order, then the fallback.
    pub fn scripted(responses: Vec<LlmResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            fallback: "Done.".to_string(),
        }
    }

    /// Mock that always returns the same assistant text and no tool calls.
    pub fn always(content: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: content.into(),
        }
    }

    /// Convenience: a response carrying a single tool call.
    pub fn tool_call_response(
        name: impl Into<String>,
        arguments: impl Into<String>,
        call_id: impl Into<String>,
    ) -> LlmResponse {
        LlmResponse::with_tool_calls(
            "",
            vec![ToolCall {
                name: name.into(),
                arguments: arguments.into(),
                id: Some(call_id.into()),
            }],
        )
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let next = {
            let mut guard = self
                .script
                .lock()
                .map_err(|_| AgentError::ExecutionFailed("mock script poisoned".to_string()))?;
            guard.pop_front()
        };
        Ok(next.unwrap_or_else(|| LlmResponse::text(self.fallback.clone())))
    }
}
