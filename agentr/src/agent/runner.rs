//! The AgentR runner: builds the graph and drives runs per thread.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use crate::channels::{boxed_updater, BoxedStateUpdater, FieldBasedUpdater};
use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, NodeMiddleware, StateGraph, END, START,
};
use crate::llm::LlmClient;
use crate::memory::{Checkpointer, MemorySaver, RunnableConfig, DEFAULT_MAX_ITERATIONS};
use crate::message::Message;
use crate::state::AgentState;
use crate::stream::{StreamEvent, StreamMode};
use crate::tools::ToolRegistry;

use super::orchestrator::Orchestrator;
use super::preprocessor::Preprocessor;
use super::researcher::Researcher;
use super::tool_node::ToolNode;

/// State updater for the agent graph: histories append, everything else replaces.
pub fn agent_state_updater() -> BoxedStateUpdater<AgentState> {
    boxed_updater(FieldBasedUpdater::new(
        |current: &mut AgentState, update: &AgentState| {
            let mut merged = update.clone();
            merged.message_history = current.message_history.clone();
            merged
                .message_history
                .extend(update.message_history.iter().cloned());
            merged.researcher_history = current.researcher_history.clone();
            merged
                .researcher_history
                .extend(update.researcher_history.iter().cloned());
            *current = merged;
        },
    ))
}

/// Construction options for [`AgentR`].
pub struct AgentOptions {
    /// Conversation thread id used for memory.
    pub thread_id: String,
    /// When true, state persists across invokes on the same thread.
    pub enable_memory: bool,
    /// Cap on research loop iterations.
    pub max_iterations: u32,
    /// Optional middleware wrapping every node (logging, tracing).
    pub middleware: Option<Arc<dyn NodeMiddleware<AgentState>>>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            thread_id: "default".to_string(),
            enable_memory: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            middleware: None,
        }
    }
}

/// Research agent with in-memory conversation history.
///
/// Wires preprocessor, orchestrator, researcher, and tool node into the
/// research graph and runs it per query.
pub struct AgentR {
    graph: CompiledStateGraph<AgentState>,
    memory: Option<Arc<MemorySaver<AgentState>>>,
    thread_id: String,
    max_iterations: u32,
}

impl AgentR {
    /// Builds the agent graph over the given model client and tool registry.
    pub fn new(
        client: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        options: AgentOptions,
    ) -> Result<Self, CompilationError> {
        let memory = options
            .enable_memory
            .then(|| Arc::new(MemorySaver::<AgentState>::new()));
        let graph = Self::build_graph(
            client,
            Arc::new(tools),
            memory.clone(),
            options.middleware,
        )?;

        info!(
            thread_id = %options.thread_id,
            memory = options.enable_memory,
            max_iterations = options.max_iterations,
            "agent initialized"
        );
        Ok(Self {
            graph,
            memory,
            thread_id: options.thread_id,
            max_iterations: options.max_iterations,
        })
    }

    fn build_graph(
        client: Arc<dyn LlmClient>,
        registry: Arc<ToolRegistry>,
        memory: Option<Arc<MemorySaver<AgentState>>>,
        middleware: Option<Arc<dyn NodeMiddleware<AgentState>>>,
    ) -> Result<CompiledStateGraph<AgentState>, CompilationError> {
        let mut builder = StateGraph::<AgentState>::new().with_state_updater(agent_state_updater());
        if let Some(mw) = middleware {
            builder = builder.with_middleware(mw);
        }

        builder.add_node("preprocessor", Arc::new(Preprocessor));
        builder.add_node("orchestrator", Arc::new(Orchestrator::new(client.clone())));
        builder.add_node(
            "researcher",
            Arc::new(Researcher::new(client, registry.list())),
        );
        builder.add_node("tool_node", Arc::new(ToolNode::new(registry)));

        builder.add_edge(START, "preprocessor");
        builder.add_edge("preprocessor", "orchestrator");
        builder.add_edge("tool_node", "researcher");

        builder.add_conditional_edges(
            "orchestrator",
            Arc::new(|s: &AgentState| {
                if s.should_delegate {
                    "researcher".to_string()
                } else {
                    END.to_string()
                }
            }),
            Some(identity_path_map(&["researcher", END])),
        );
        builder.add_conditional_edges(
            "researcher",
            Arc::new(|s: &AgentState| {
                if s.should_continue {
                    "tool_node".to_string()
                } else {
                    "orchestrator".to_string()
                }
            }),
            Some(identity_path_map(&["tool_node", "orchestrator"])),
        );

        match memory {
            Some(m) => {
                let checkpointer: Arc<dyn Checkpointer<AgentState>> = m;
                builder.compile_with_checkpointer(checkpointer)
            }
            None => builder.compile(),
        }
    }

    fn run_config(&self) -> RunnableConfig {
        RunnableConfig {
            thread_id: Some(self.thread_id.clone()),
            max_iterations: self.max_iterations,
            ..Default::default()
        }
    }

    /// Initial state for one run, carrying forward the thread's history.
    async fn initial_state(&self, request: &str) -> AgentState {
        let mut state = AgentState::for_query(request);
        if let Some(memory) = &self.memory {
            if let Ok(Some((checkpoint, _))) = memory.get_tuple(&self.run_config()).await {
                state.message_history = checkpoint.channel_values.message_history;
            }
        }
        state
    }

    /// Runs the agent on a request and returns the final response text.
    pub async fn invoke(&self, request: &str) -> Result<String, AgentError> {
        let state = self.initial_state(request).await;
        let final_state = self.graph.invoke(state, Some(self.run_config())).await?;

        if final_state.response.is_empty() {
            return Err(AgentError::EmptyResponse);
        }
        Ok(final_state.response)
    }

    /// Streams per-node updates for a request.
    pub async fn stream(&self, request: &str) -> ReceiverStream<StreamEvent<AgentState>> {
        let state = self.initial_state(request).await;
        self.graph
            .stream(state, Some(self.run_config()), StreamMode::Updates)
    }

    /// Latest persisted state for this thread, when memory is enabled.
    pub async fn state(&self) -> Option<AgentState> {
        let memory = self.memory.as_ref()?;
        memory
            .get_tuple(&self.run_config())
            .await
            .ok()
            .flatten()
            .map(|(checkpoint, _)| checkpoint.channel_values)
    }

    /// Conversation message history for this thread.
    pub async fn message_history(&self) -> Vec<Message> {
        self.state()
            .await
            .map(|s| s.message_history)
            .unwrap_or_default()
    }

    /// Clears conversation memory for the current thread.
    pub async fn clear_memory(&self) {
        match &self.memory {
            Some(memory) => {
                memory.delete_thread(&self.thread_id).await;
                info!(thread_id = %self.thread_id, "memory cleared");
            }
            None => info!("memory not enabled"),
        }
    }
}

fn identity_path_map(targets: &[&str]) -> HashMap<String, String> {
    targets
        .iter()
        .map(|t| (t.to_string(), t.to_string()))
        .collect()
}
