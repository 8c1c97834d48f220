//! Run context passed into nodes for streaming-aware execution.
//!
//! Holds the runnable config, optional stream sender, and selected stream
//! modes. Nodes that care about per-run settings (e.g. the researcher's
//! iteration limit) read them from `ctx.config`.

use std::collections::HashSet;
use std::fmt::Debug;

use tokio::sync::mpsc;

use crate::memory::RunnableConfig;
use crate::stream::{StreamEvent, StreamMode};

/// Run context passed into nodes during graph execution.
#[derive(Clone)]
pub struct RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Config for the current run (thread_id, checkpoint, max_iterations).
    pub config: RunnableConfig,
    /// Optional sender for streaming events.
    pub stream_tx: Option<mpsc::Sender<StreamEvent<S>>>,
    /// Enabled stream modes (Values, Updates).
    pub stream_mode: HashSet<StreamMode>,
}

impl<S> RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates a new RunContext with no streaming.
    pub fn new(config: RunnableConfig) -> Self {
        Self {
            config,
            stream_tx: None,
            stream_mode: HashSet::new(),
        }
    }
}
