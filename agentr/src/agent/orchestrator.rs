//! Orchestrator node: answer directly or delegate research.
//!
//! Binds the `research_sub_agent` spec so the model can hand off; a tool call
//! in the response means delegate, plain text means the run is done.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, ToolChoiceMode};
use crate::message::Message;
use crate::state::AgentState;
use crate::tools::research_subagent_spec;

use super::prompts::orchestrator_prompt;

/// Arguments of the research delegation tool call.
#[derive(Debug, Deserialize)]
struct ShouldResearch {
    subtasks: Vec<String>,
}

/// Decides between a direct answer and delegation to the researcher.
pub struct Orchestrator {
    client: Arc<dyn LlmClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Node<AgentState> for Orchestrator {
    fn id(&self) -> &str {
        "orchestrator"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut messages = vec![Message::system(orchestrator_prompt())];
        messages.extend(state.message_history.iter().cloned());

        let response = self
            .client
            .invoke_with_tools(&messages, &[research_subagent_spec()], ToolChoiceMode::Auto)
            .await?;

        let mut delta = state.delta();

        if let Some(tool_call) = response.tool_calls.first() {
            let call_id = tool_call.id.clone().ok_or_else(|| {
                AgentError::ExecutionFailed(
                    "research id not provided in tool call".to_string(),
                )
            })?;
            let args: ShouldResearch =
                serde_json::from_str(&tool_call.arguments).map_err(|e| {
                    AgentError::ExecutionFailed(format!("bad research tool arguments: {}", e))
                })?;

            debug!(subtasks = args.subtasks.len(), "orchestrator delegates");
            delta
                .message_history
                .push(Message::assistant(&response.content));
            delta.should_delegate = true;
            delta.planned_subtasks = args.subtasks;
            delta.sub_agent_call_id = call_id;
            return Ok((delta, Next::Continue));
        }

        debug!("orchestrator answers directly");
        delta
            .message_history
            .push(Message::assistant(&response.content));
        delta.should_delegate = false;
        delta.response = response.content;
        Ok((delta, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmResponse, MockLlm};
    use crate::tools::RESEARCH_TOOL_NAME;

    /// **Scenario**: A plain-text response sets the final answer without delegation.
    #[tokio::test]
    async fn direct_answer_sets_response() {
        let llm = Arc::new(MockLlm::always("Rust is a systems language."));
        let node = Orchestrator::new(llm);
        let mut state = AgentState::for_query("what is rust?");
        state.message_history.push(Message::user("what is rust?"));

        let (delta, _) = node.run(state).await.unwrap();
        assert!(!delta.should_delegate);
        assert_eq!(delta.response, "Rust is a systems language.");
        assert_eq!(delta.message_history.len(), 1);
    }

    /// **Scenario**: A research_sub_agent tool call sets delegation fields and
    /// leaves the response empty.
    #[tokio::test]
    async fn tool_call_delegates_research() {
        let llm = Arc::new(MockLlm::scripted(vec![MockLlm::tool_call_response(
            RESEARCH_TOOL_NAME,
            r#"{"subtasks": ["find latest release", "summarize changes"]}"#,
            "call-42",
        )]));
        let node = Orchestrator::new(llm);
        let mut state = AgentState::for_query("what's new in rust?");
        state.message_history.push(Message::user("what's new?"));

        let (delta, _) = node.run(state).await.unwrap();
        assert!(delta.should_delegate);
        assert_eq!(delta.planned_subtasks.len(), 2);
        assert_eq!(delta.sub_agent_call_id, "call-42");
        assert!(delta.response.is_empty());
    }

    /// **Scenario**: A tool call without an id fails the run.
    #[tokio::test]
    async fn tool_call_without_id_fails() {
        let mut response =
            MockLlm::tool_call_response(RESEARCH_TOOL_NAME, r#"{"subtasks": []}"#, "x");
        response.tool_calls[0].id = None;
        let llm = Arc::new(MockLlm::scripted(vec![response]));
        let node = Orchestrator::new(llm);

        let result = node.run(AgentState::for_query("q")).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(_))));
    }

    /// **Scenario**: Malformed tool arguments fail the run.
    #[tokio::test]
    async fn bad_tool_arguments_fail() {
        let llm = Arc::new(MockLlm::scripted(vec![MockLlm::tool_call_response(
            RESEARCH_TOOL_NAME,
            "not json",
            "call-1",
        )]));
        let node = Orchestrator::new(llm);

        let result = node.run(AgentState::for_query("q")).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(_))));
    }
}
