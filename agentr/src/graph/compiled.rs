//! Compiled, executable state graph.
//!
//! Built by `StateGraph::compile` or `compile_with_checkpointer`. Holds nodes,
//! the routing map derived from explicit edges at compile time, and an optional
//! checkpointer. When a checkpointer is set and `config.thread_id` is provided,
//! the final state is saved after each run.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::channels::BoxedStateUpdater;
use crate::error::AgentError;
use crate::graph::conditional::NextEntry;
use crate::graph::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_state_update,
};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::graph::run_context::RunContext;
use crate::graph::state_graph::END;
use crate::graph::Next;
use crate::memory::{Checkpoint, CheckpointSource, Checkpointer, RunnableConfig};
use crate::stream::{StreamEvent, StreamMode};

/// Executable graph created by `StateGraph::compile()`.
///
/// Runs from the first node (the single edge out of START); after each node,
/// applies the state updater and resolves the next node from the routing map.
/// When a checkpointer is set, `invoke(state, config)` saves the final state
/// for `config.thread_id`.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (from START).
    pub(super) first_node_id: String,
    /// Linear order of nodes (used for Next::Continue when no conditional edges).
    pub(super) edge_order: Vec<String>,
    /// Map from node id to how to get next: Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    /// Optional node middleware wrapping every node.run.
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    /// State updater that controls how node outputs are merged into state.
    pub(super) state_updater: BoxedStateUpdater<S>,
}

impl<S> Clone for CompiledStateGraph<S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            first_node_id: self.first_node_id.clone(),
            edge_order: self.edge_order.clone(),
            next_map: self.next_map.clone(),
            checkpointer: self.checkpointer.clone(),
            middleware: self.middleware.clone(),
            state_updater: self.state_updater.clone(),
        }
    }
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Execute one node, wrapped in middleware when configured.
    async fn execute_node(
        &self,
        node: Arc<dyn Node<S>>,
        state: S,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<(S, Next), AgentError> {
        if let Some(middleware) = &self.middleware {
            let node_id = node.id().to_string();
            let run_ctx_owned = run_ctx.cloned();
            let node_clone = node.clone();
            middleware
                .around_run(
                    &node_id,
                    state,
                    Box::new(move |s| {
                        let node = node_clone.clone();
                        let run_ctx_inner = run_ctx_owned.clone();
                        Box::pin(async move {
                            if let Some(ctx) = run_ctx_inner.as_ref() {
                                node.run_with_context(s, ctx).await
                            } else {
                                node.run(s).await
                            }
                        })
                    }),
                )
                .await
        } else if let Some(ctx) = run_ctx {
            node.run_with_context(state, ctx).await
        } else {
            node.run(state).await
        }
    }

    /// Shared run loop used by invoke() and stream(): steps through nodes until
    /// completion, applying the state updater and resolving routing after each node.
    async fn run_loop_inner(
        &self,
        state: &mut S,
        config: &Option<RunnableConfig>,
        current_id: &mut String,
        run_ctx: Option<&RunContext<S>>,
    ) -> Result<(), AgentError> {
        log_graph_start();
        loop {
            let node = self
                .nodes
                .get(current_id.as_str())
                .cloned()
                .ok_or_else(|| {
                    AgentError::ExecutionFailed(format!("node not found: {}", current_id))
                })?;

            log_node_start(current_id);
            log_node_state(current_id, state);

            let (new_state, next) = match self
                .execute_node(node, state.clone(), run_ctx)
                .await
            {
                Ok(output) => output,
                Err(e) => {
                    log_graph_error(&e);
                    return Err(e);
                }
            };

            log_node_complete(current_id, &next);

            // Apply state update using the configured updater
            self.state_updater.apply_update(state, &new_state);
            log_state_update(current_id);

            if let Some(ctx) = run_ctx {
                if let Some(tx) = &ctx.stream_tx {
                    if ctx.stream_mode.contains(&StreamMode::Values) {
                        let _ = tx.send(StreamEvent::Values(state.clone())).await;
                    }
                    if ctx.stream_mode.contains(&StreamMode::Updates) {
                        let _ = tx
                            .send(StreamEvent::Updates {
                                node_id: current_id.clone(),
                                state: state.clone(),
                            })
                            .await;
                    }
                }
            }

            let next_id: Option<String> =
                if let Some(NextEntry::Conditional(router)) = self.next_map.get(current_id.as_str())
                {
                    let target = router.resolve_next(state);
                    tracing::debug!(
                        from = %current_id,
                        to = %target,
                        "conditional routing"
                    );
                    Some(target)
                } else {
                    match next {
                        Next::End => None,
                        Next::Continue => self
                            .next_map
                            .get(current_id.as_str())
                            .and_then(|e| {
                                if let NextEntry::Unconditional(id) = e {
                                    Some(id.clone())
                                } else {
                                    None
                                }
                            })
                            .or_else(|| {
                                let pos =
                                    self.edge_order.iter().position(|x| x == current_id)?;
                                self.edge_order.get(pos + 1).cloned()
                            }),
                    }
                };

            let should_end = next_id.is_none() || next_id.as_deref() == Some(END);
            if should_end {
                if let (Some(cp), Some(cfg)) = (&self.checkpointer, config) {
                    if cfg.thread_id.is_some() {
                        let checkpoint =
                            Checkpoint::from_state(state.clone(), CheckpointSource::Update, 0);
                        if let Err(e) = cp.put(cfg, &checkpoint).await {
                            tracing::warn!(error = %e, "failed to save checkpoint");
                        }
                    }
                }
                log_graph_complete();
                return Ok(());
            }
            if let Some(id) = next_id {
                *current_id = id;
            }
        }
    }

    /// Runs the graph with the given state. Starts at the first node; after
    /// each node, uses the routing map (and the node's `Next`) to continue
    /// or end.
    ///
    /// When `config` has `thread_id` and the graph was compiled with a
    /// checkpointer, the final state is saved after the run. Pass `None` for
    /// config to skip persistence.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        if self.nodes.is_empty() || !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        let config = config.unwrap_or_default();
        let run_ctx = RunContext::new(config.clone());
        let mut state = state;
        let mut current_id = self.first_node_id.clone();

        self.run_loop_inner(&mut state, &Some(config), &mut current_id, Some(&run_ctx))
            .await?;

        Ok(state)
    }

    /// Streams graph execution, emitting events via channel-backed Stream.
    pub fn stream(
        &self,
        state: S,
        config: Option<RunnableConfig>,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let mode_set: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            let mut state = state;
            let mut current_id = graph.first_node_id.clone();
            if !graph.nodes.contains_key(&current_id) {
                return;
            }
            let mut run_ctx = RunContext::new(config.clone().unwrap_or_default());
            run_ctx.stream_tx = Some(tx);
            run_ctx.stream_mode = mode_set;

            let _ = graph
                .run_loop_inner(&mut state, &config, &mut current_id, Some(&run_ctx))
                .await;
        });

        ReceiverStream::new(rx)
    }
}
