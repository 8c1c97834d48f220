//! Agent state and tool call types for the research graph.
//!
//! `AgentState` holds the user-facing conversation (`message_history`), the
//! researcher's private loop (`researcher_history`), and the handoff fields the
//! orchestrator and researcher use to coordinate delegation.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::state::Source;

/// A single tool invocation produced by the LLM and consumed by the tool node.
///
/// `arguments` is the raw JSON string as returned by the model; the tool node
/// parses it when calling [`ToolRegistry::call`](crate::tools::ToolRegistry::call).
/// `id` correlates the call with the `Message::Tool` result appended afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as registered in the ToolRegistry.
    pub name: String,
    /// Arguments as JSON string; parsed by the tool node when calling the tool.
    pub arguments: String,
    /// Optional id to match with the tool result message.
    pub id: Option<String>,
}

/// State for the plan-and-execute research graph.
///
/// The two history fields use append semantics: the graph's state updater
/// extends them with whatever a node returns, so nodes return only the
/// messages they add (build the return value from [`AgentState::delta`]).
/// Every other field is replaced by the node's returned value.
///
/// Satisfies `Clone + Send + Sync + 'static` for use with `Node<AgentState>`
/// and `StateGraph<AgentState>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentState {
    /// The user's request for the current run.
    pub query: String,
    /// Final answer text; set by the orchestrator when it answers directly.
    pub response: String,
    /// User-facing conversation (user query, orchestrator replies, research handoffs).
    pub message_history: Vec<Message>,
    /// True when the orchestrator decided to delegate to the researcher.
    pub should_delegate: bool,
    /// True when the researcher wants another search round.
    pub should_continue: bool,
    /// Researcher loop counter; 0 means the loop has not started.
    #[serde(default)]
    pub current_iteration: u32,
    /// Subtasks the orchestrator planned for the researcher.
    pub planned_subtasks: Vec<String>,
    /// Id of the orchestrator's research tool call; the researcher's final
    /// report is appended as `Message::Tool` with this id.
    pub sub_agent_call_id: String,
    /// Researcher's private loop: subtask request, search decisions, tool results.
    pub researcher_history: Vec<Message>,
    /// Current round tool calls (researcher writes, tool node reads and clears).
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    /// Sources collected so far in the current research loop.
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl AgentState {
    /// Builds the initial state for one run of the graph.
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Copy of the state with both history fields emptied.
    ///
    /// Nodes build their return value from this so that messages they append
    /// are not duplicated when the state updater extends the histories.
    pub fn delta(&self) -> Self {
        Self {
            message_history: Vec::new(),
            researcher_history: Vec::new(),
            ..self.clone()
        }
    }

    /// Returns the content of the chronologically last Assistant message in the
    /// user-facing history, if any.
    pub fn last_assistant_reply(&self) -> Option<String> {
        self.message_history.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.clone()),
            _ => None,
        })
    }
}
