//! Invoke config: thread_id, checkpoint_id, checkpoint_ns, max_iterations.
//!
//! Used by `CompiledStateGraph::invoke` and `Checkpointer`.

/// Default cap on research loop iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 4;

/// Config for a single invoke. Identifies the thread and optional checkpoint.
///
/// When using a checkpointer, invoke must provide at least `thread_id`.
///
/// **Interaction**: Passed to `CompiledStateGraph::invoke(state, config)` and
/// `Checkpointer::put` / `get_tuple` / `list`. Nodes read `max_iterations`
/// through the `RunContext`.
#[derive(Debug, Clone)]
pub struct RunnableConfig {
    /// Unique id for this conversation/thread. Required when using a checkpointer.
    pub thread_id: Option<String>,
    /// If set, load state from this checkpoint instead of the latest.
    pub checkpoint_id: Option<String>,
    /// Optional namespace for checkpoints. Default is empty.
    pub checkpoint_ns: String,
    /// Cap on research loop iterations before forced synthesis.
    pub max_iterations: u32,
}

impl Default for RunnableConfig {
    fn default() -> Self {
        Self {
            thread_id: None,
            checkpoint_id: None,
            checkpoint_ns: String::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
