//! Next-step result from a graph node: continue along the edges, or end.
//!
//! The graph runner uses this to decide the next node or to stop.

/// Next step after running a node.
///
/// - **Continue**: follow the graph's edges (next node in chain, or END if last).
/// - **End**: stop; return current state as final result.
///
/// Returned by `Node::run`; consumed by `CompiledStateGraph::invoke`. For nodes
/// with conditional edges the router decides instead and the node's `Next` is
/// ignored.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the graph's edges; if current node is last, equivalent to End.
    Continue,
    /// Stop and return the current state.
    End,
}
