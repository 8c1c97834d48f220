//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when edges reference unknown nodes or do
//! not form a valid graph from START to END.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Validation ensures every id in edges (except START/END) exists in the node
/// map, there is exactly one edge from START, at least one path reaches END,
/// and no node mixes a fixed edge with conditional edges.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has from_id == START, or more than one such edge.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// No edge or conditional path reaches END.
    #[error("graph must have a path to END")]
    MissingEnd,

    /// Fixed edges do not form a valid chain (e.g. branch, cycle).
    #[error("invalid edge chain: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path_map is not a valid node id or END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of NodeNotFound contains "node not found" and the node id.
    #[test]
    fn compilation_error_display_node_not_found() {
        let err = CompilationError::NodeNotFound("x".to_string());
        let s = err.to_string();
        assert!(
            s.contains("node not found"),
            "Display should contain 'node not found': {}",
            s
        );
        assert!(s.contains("x"), "Display should contain node id: {}", s);
    }

    /// **Scenario**: Display of MissingStart and MissingEnd mention START/END.
    #[test]
    fn compilation_error_display_missing_start_end() {
        assert!(CompilationError::MissingStart
            .to_string()
            .to_lowercase()
            .contains("start"));
        assert!(CompilationError::MissingEnd
            .to_string()
            .to_lowercase()
            .contains("end"));
    }

    /// **Scenario**: Display of InvalidChain contains the reason.
    #[test]
    fn compilation_error_display_invalid_chain() {
        let s = CompilationError::InvalidChain("cycle detected".to_string()).to_string();
        assert!(s.contains("cycle detected"), "{}", s);
    }
}
