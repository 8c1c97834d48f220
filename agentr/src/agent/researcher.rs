//! Researcher node: iterative web research loop.
//!
//! Iteration 0 must produce a tool call for the planned subtasks; later
//! iterations either keep searching (tool call), hand a final report back to
//! the orchestrator (plain text), or are cut off by the iteration cap with a
//! synthesis of the sources collected so far.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::{LlmClient, LlmResponse, ToolChoiceMode};
use crate::memory::DEFAULT_MAX_ITERATIONS;
use crate::message::Message;
use crate::state::AgentState;
use crate::tools::ToolSpec;

use super::findings::{format_research_synthesis, parse_research_results};
use super::prompts::{researcher_prompt, MAX_ITERATION_MESSAGE};

/// Runs the research loop against the bound search tools.
pub struct Researcher {
    client: Arc<dyn LlmClient>,
    tools: Vec<ToolSpec>,
}

impl Researcher {
    pub fn new(client: Arc<dyn LlmClient>, tools: Vec<ToolSpec>) -> Self {
        Self { client, tools }
    }

    async fn step(
        &self,
        state: AgentState,
        max_iterations: u32,
    ) -> Result<(AgentState, Next), AgentError> {
        if state.current_iteration == 0 {
            return self.handle_initial_request(state).await;
        }
        if state.current_iteration > max_iterations {
            return Self::handle_max_iterations(state);
        }
        self.handle_subsequent_iterations(state).await
    }

    async fn invoke_with_history(
        &self,
        state: &AgentState,
        extra: Option<&Message>,
    ) -> Result<LlmResponse, AgentError> {
        let mut messages = vec![Message::system(researcher_prompt())];
        messages.extend(state.researcher_history.iter().cloned());
        if let Some(m) = extra {
            messages.push(m.clone());
        }
        self.client
            .invoke_with_tools(&messages, &self.tools, ToolChoiceMode::Auto)
            .await
    }

    /// First iteration: the subtask request must yield a tool call.
    async fn handle_initial_request(
        &self,
        state: AgentState,
    ) -> Result<(AgentState, Next), AgentError> {
        let request = Message::user(format!("{:?}", state.planned_subtasks));
        let response = self.invoke_with_history(&state, Some(&request)).await?;

        if response.tool_calls.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "expected tool call from researcher, got none".to_string(),
            ));
        }

        debug!(
            iteration = state.current_iteration,
            tool_calls = response.tool_calls.len(),
            "researcher starts"
        );
        let mut delta = state.delta();
        delta.current_iteration = state.current_iteration + 1;
        delta.researcher_history = vec![request, Message::assistant(&response.content)];
        delta.should_continue = true;
        delta.tool_calls = response.tool_calls;
        Ok((delta, Next::Continue))
    }

    /// Middle iterations: tool call keeps searching, plain text finalizes.
    async fn handle_subsequent_iterations(
        &self,
        state: AgentState,
    ) -> Result<(AgentState, Next), AgentError> {
        let response = self.invoke_with_history(&state, None).await?;
        if response.tool_calls.is_empty() {
            Self::finalize_research(state, response)
        } else {
            Self::continue_research(state, response)
        }
    }

    /// Collect sources from the last tool result and queue the next searches.
    fn continue_research(
        state: AgentState,
        response: LlmResponse,
    ) -> Result<(AgentState, Next), AgentError> {
        let last = state.researcher_history.last().ok_or_else(|| {
            AgentError::ExecutionFailed("researcher history is empty".to_string())
        })?;
        let new_sources = parse_research_results(last.content())
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;

        debug!(
            iteration = state.current_iteration,
            new_sources = new_sources.len(),
            "researcher continues"
        );
        let mut delta = state.delta();
        delta.sources.extend(new_sources);
        delta.current_iteration = state.current_iteration + 1;
        delta.researcher_history = vec![Message::assistant(&response.content)];
        delta.should_continue = true;
        delta.tool_calls = response.tool_calls;
        Ok((delta, Next::Continue))
    }

    /// Hand the final report back to the orchestrator and reset the loop.
    fn finalize_research(
        state: AgentState,
        response: LlmResponse,
    ) -> Result<(AgentState, Next), AgentError> {
        if state.sub_agent_call_id.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "sub_agent_call_id not found in state".to_string(),
            ));
        }

        debug!(iteration = state.current_iteration, "researcher finalizes");
        let mut delta = state.delta();
        delta.message_history = vec![Message::tool(
            &response.content,
            &state.sub_agent_call_id,
        )];
        delta.researcher_history = vec![Message::assistant(&response.content)];
        delta.should_continue = false;
        delta.planned_subtasks = Vec::new();
        delta.sub_agent_call_id = String::new();
        delta.current_iteration = 0;
        delta.tool_calls = Vec::new();
        delta.sources = Vec::new();
        Ok((delta, Next::Continue))
    }

    /// The cap is hit: synthesize collected sources into the report.
    fn handle_max_iterations(state: AgentState) -> Result<(AgentState, Next), AgentError> {
        if state.sub_agent_call_id.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "sub_agent_call_id not found in state".to_string(),
            ));
        }

        let synthesis = format_research_synthesis(&state.sources);
        debug!(
            iteration = state.current_iteration,
            sources = state.sources.len(),
            "researcher hit iteration cap"
        );
        let mut delta = state.delta();
        delta.message_history = vec![Message::tool(&synthesis, &state.sub_agent_call_id)];
        delta.researcher_history = vec![Message::assistant(MAX_ITERATION_MESSAGE)];
        delta.should_continue = false;
        delta.planned_subtasks = Vec::new();
        delta.sub_agent_call_id = String::new();
        delta.current_iteration = 0;
        delta.tool_calls = Vec::new();
        delta.sources = Vec::new();
        Ok((delta, Next::Continue))
    }
}

#[async_trait]
impl Node<AgentState> for Researcher {
    fn id(&self) -> &str {
        "researcher"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        self.step(state, DEFAULT_MAX_ITERATIONS).await
    }

    async fn run_with_context(
        &self,
        state: AgentState,
        ctx: &RunContext<AgentState>,
    ) -> Result<(AgentState, Next), AgentError> {
        self.step(state, ctx.config.max_iterations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::state::Source;

    fn delegated_state() -> AgentState {
        let mut state = AgentState::for_query("q");
        state.should_delegate = true;
        state.planned_subtasks = vec!["find facts".to_string()];
        state.sub_agent_call_id = "call-42".to_string();
        state
    }

    fn researcher_with(llm: MockLlm) -> Researcher {
        Researcher::new(Arc::new(llm), vec![])
    }

    /// **Scenario**: Iteration 0 with a tool call starts the loop: iteration
    /// becomes 1, history carries request and reply, tool calls are queued.
    #[tokio::test]
    async fn initial_request_starts_loop() {
        let node = researcher_with(MockLlm::scripted(vec![MockLlm::tool_call_response(
            "web_search",
            r#"{"query": "facts"}"#,
            "call-1",
        )]));
        let (delta, _) = node.run(delegated_state()).await.unwrap();

        assert_eq!(delta.current_iteration, 1);
        assert!(delta.should_continue);
        assert_eq!(delta.researcher_history.len(), 2);
        assert!(matches!(&delta.researcher_history[0], Message::User(_)));
        assert_eq!(delta.tool_calls.len(), 1);
    }

    /// **Scenario**: Iteration 0 without a tool call is an error.
    #[tokio::test]
    async fn initial_request_requires_tool_call() {
        let node = researcher_with(MockLlm::always("no search needed"));
        let result = node.run(delegated_state()).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(_))));
    }

    /// **Scenario**: A middle iteration with another tool call parses the last
    /// tool result into sources and keeps going.
    #[tokio::test]
    async fn continued_iteration_collects_sources() {
        let node = researcher_with(MockLlm::scripted(vec![MockLlm::tool_call_response(
            "web_search",
            r#"{"query": "more"}"#,
            "call-2",
        )]));
        let mut state = delegated_state();
        state.current_iteration = 1;
        state.researcher_history = vec![Message::tool(
            r#"[{"source": "https://a.example", "content": "alpha", "type": "web"}]"#,
            "call-1",
        )];

        let (delta, _) = node.run(state).await.unwrap();
        assert_eq!(delta.current_iteration, 2);
        assert!(delta.should_continue);
        assert_eq!(delta.sources.len(), 1);
        assert_eq!(delta.sources[0].source, "https://a.example");
    }

    /// **Scenario**: A malformed tool result fails the continued iteration.
    #[tokio::test]
    async fn continued_iteration_rejects_bad_tool_result() {
        let node = researcher_with(MockLlm::scripted(vec![MockLlm::tool_call_response(
            "web_search",
            r#"{"query": "more"}"#,
            "call-2",
        )]));
        let mut state = delegated_state();
        state.current_iteration = 1;
        state.researcher_history = vec![Message::tool("not json", "call-1")];

        let result = node.run(state).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(_))));
    }

    /// **Scenario**: A plain-text reply finalizes: the report is handed back as
    /// a tool message with the orchestrator's call id and loop fields reset.
    #[tokio::test]
    async fn plain_reply_finalizes_research() {
        let node = researcher_with(MockLlm::always("Final report."));
        let mut state = delegated_state();
        state.current_iteration = 2;
        state.researcher_history = vec![Message::assistant("searching...")];

        let (delta, _) = node.run(state).await.unwrap();
        assert!(!delta.should_continue);
        assert_eq!(delta.current_iteration, 0);
        assert!(delta.planned_subtasks.is_empty());
        assert!(delta.sub_agent_call_id.is_empty());
        assert!(matches!(
            &delta.message_history[0],
            Message::Tool { content, call_id } if content == "Final report." && call_id == "call-42"
        ));
    }

    /// **Scenario**: Past the cap, the node synthesizes collected sources
    /// without calling the model and records the cutoff message.
    #[tokio::test]
    async fn iteration_cap_forces_synthesis() {
        let node = researcher_with(MockLlm::always("should not be called"));
        let mut state = delegated_state();
        state.current_iteration = DEFAULT_MAX_ITERATIONS + 1;
        state.sources = vec![Source::web("https://a.example", "alpha")];

        let (delta, _) = node.run(state).await.unwrap();
        assert!(!delta.should_continue);
        assert_eq!(delta.current_iteration, 0);
        assert!(delta.sources.is_empty());
        match &delta.message_history[0] {
            Message::Tool { content, call_id } => {
                assert!(content.contains("Total Sources: 1"));
                assert_eq!(call_id, "call-42");
            }
            other => panic!("expected tool message, got {:?}", other),
        }
        assert!(matches!(
            &delta.researcher_history[0],
            Message::Assistant(s) if s == MAX_ITERATION_MESSAGE
        ));
    }

    /// **Scenario**: The cap from RunnableConfig is honored through the run context.
    #[tokio::test]
    async fn cap_from_config_is_honored() {
        use crate::memory::RunnableConfig;

        let node = researcher_with(MockLlm::always("unused"));
        let mut state = delegated_state();
        state.current_iteration = 2;

        let config = RunnableConfig {
            max_iterations: 1,
            ..Default::default()
        };
        let ctx = RunContext::new(config);
        let (delta, _) = node.run_with_context(state, &ctx).await.unwrap();
        assert!(!delta.should_continue);
        assert!(matches!(&delta.message_history[0], Message::Tool { .. }));
    }
}
