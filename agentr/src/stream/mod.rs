//! Streaming modes and events for graph execution.
//!
//! `CompiledStateGraph::stream` emits `StreamEvent`s on a channel-backed
//! stream; the caller selects which event kinds to receive via `StreamMode`.

use std::collections::HashSet;

/// Which events `stream()` emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Full state snapshot after each node completes.
    Values,
    /// Per-node update carrying the node id and the state after the update.
    Updates,
}

impl From<StreamMode> for HashSet<StreamMode> {
    fn from(mode: StreamMode) -> Self {
        HashSet::from([mode])
    }
}

/// Event emitted during streamed graph execution.
#[derive(Debug, Clone)]
pub enum StreamEvent<S> {
    /// Full state after a node completed (StreamMode::Values).
    Values(S),
    /// State after a specific node completed (StreamMode::Updates).
    Updates { node_id: String, state: S },
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: A single StreamMode converts into a one-element set, so
    /// callers can pass a bare mode to stream().
    #[test]
    fn mode_converts_to_singleton_set() {
        let set: HashSet<StreamMode> = StreamMode::Updates.into();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&StreamMode::Updates));
    }
}
