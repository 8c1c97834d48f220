//! Agent execution error types.
//!
//! Used by `Node::run`, the LLM clients, and the `AgentR` runner.

use thiserror::Error;

/// Agent execution error.
///
/// Returned by graph nodes and by `AgentR::invoke` when a step fails.
/// Single-variant failures carry a message; no separate error types for
/// tools or LLM in this minimal API.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed, tool error,
    /// malformed tool call).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The graph finished but the final state carries no response text.
    ///
    /// Raised by `AgentR::invoke` so callers never see an empty answer
    /// as success.
    #[error("agent execution completed but response is empty")]
    EmptyResponse,
}
