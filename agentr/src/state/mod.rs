//! State types for the research agent graph.
//!
//! The graph state flows through [`StateGraph`](crate::graph::StateGraph) and is
//! read/written by the preprocessor, orchestrator, researcher, and tool nodes.
//!
//! # Main types
//!
//! - [`AgentState`]: Conversation history plus the orchestrator/researcher
//!   handoff fields; use [`AgentState::for_query`] to build the initial state.
//! - [`ToolCall`]: A single tool invocation from the LLM; consumed by the tool
//!   node to call [`ToolRegistry::call`](crate::tools::ToolRegistry::call).
//! - [`Source`]: One piece of research evidence (URL plus extracted content).

pub mod agent_state;
pub mod source;

pub use agent_state::{AgentState, ToolCall};
pub use source::{Source, SourceType};
