//! Conditional edges: route to the next node based on state.
//!
//! A source node has a routing function that takes the current state and
//! returns a key; the key is either used as the next node id or looked up in an
//! optional path map. Used by `StateGraph::add_conditional_edges` and the
//! `CompiledStateGraph` run loop.

use std::collections::HashMap;
use std::sync::Arc;

/// Router function: takes a reference to state and returns a routing key.
///
/// The key is used as the next node id when no path map is provided, or
/// looked up in the path map to get the next node id (or END).
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Conditional edge definition: routing function plus optional path map.
///
/// - When `path_map` is `None`, the router's return value is used directly as
///   the next node id.
/// - When `path_map` is `Some(map)`, the return value is the key; the next node
///   id is `map[key]` if present, otherwise the key itself.
pub struct ConditionalRouter<S> {
    /// Function that returns a routing key from the current state.
    pub(super) path: ConditionalRouterFn<S>,
    /// Optional map from routing key to node id (or END).
    pub(super) path_map: Option<HashMap<String, String>>,
}

// Manual impl: the derive would bound `S: Clone`, but only the Arc'd router
// and the path map are cloned, never the state.
impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            path_map: self.path_map.clone(),
        }
    }
}

impl<S> ConditionalRouter<S> {
    /// Builds a conditional router with an optional path map.
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id from the current state.
    ///
    /// Returns the node id (or END) to run next. Used by the compiled graph run loop.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        self.path_map
            .as_ref()
            .and_then(|m| m.get(&key))
            .cloned()
            .unwrap_or(key)
    }
}

/// How to determine the next node after a given node runs.
///
/// Stored in the compiled graph's next map. Nodes with a single outgoing edge
/// use `Unconditional(to_id)`; nodes with conditional edges use
/// `Conditional(router)`, resolved at runtime from state.
pub enum NextEntry<S> {
    /// Single fixed next node (or END). The node's `Next` is still respected.
    Unconditional(String),
    /// Next node is decided by the router from state; the node's `Next` is ignored.
    Conditional(ConditionalRouter<S>),
}

impl<S> Clone for NextEntry<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Unconditional(id) => Self::Unconditional(id.clone()),
            Self::Conditional(router) => Self::Conditional(router.clone()),
        }
    }
}
