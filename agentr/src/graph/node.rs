//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S`, returns updated `S` and `Next` (continue or end).
//! Nodes that need the run config (e.g. the researcher's iteration limit)
//! override `run_with_context`.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::{Next, RunContext};

/// One step in a graph: state in, (state out, next step).
///
/// The graph runner uses `Next` to choose the next node (Continue = follow
/// the edges, End = stop). When the state updater appends history
/// fields, the returned state should carry only the new messages.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"orchestrator"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, (state out, next step).
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;

    /// Optional variant with run context (streaming, config).
    ///
    /// Default implementation calls `run` and ignores the context.
    async fn run_with_context(
        &self,
        state: S,
        _ctx: &RunContext<S>,
    ) -> Result<(S, Next), AgentError> {
        self.run(state).await
    }
}
