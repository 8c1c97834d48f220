//! Logging middleware that records node enter/exit around each node.run call.

use async_trait::async_trait;
use std::fmt::Debug;
use std::pin::Pin;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, NodeMiddleware};

/// Middleware that logs node enter/exit around each node.run call.
///
/// Generic over state type `S`; only node_id and outcome are logged.
pub struct LoggingNodeMiddleware<S> {
    _phantom: std::marker::PhantomData<S>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: Box<
            dyn FnOnce(
                    S,
                ) -> Pin<
                    Box<dyn std::future::Future<Output = Result<(S, Next), AgentError>> + Send>,
                > + Send,
        >,
    ) -> Result<(S, Next), AgentError> {
        debug!(node = %node_id, "node enter");
        let result = inner(state).await;
        match &result {
            Ok((_, next)) => debug!(node = %node_id, next = ?next, "node exit"),
            Err(e) => warn!(node = %node_id, error = %e, "node failed"),
        }
        result
    }
}
