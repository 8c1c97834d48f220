//! Tool node: executes the researcher's queued tool calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::AgentState;
use crate::tools::ToolRegistry;

/// Executes every queued tool call against the registry and appends each
/// result to the researcher's history as a tool message.
///
/// A failing call (unknown tool, bad arguments, transport error) produces an
/// error-text tool message instead of failing the run, so the researcher can
/// route around a failed search on its next turn.
pub struct ToolNode {
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Node<AgentState> for ToolNode {
    fn id(&self) -> &str {
        "tool_node"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let mut delta = state.delta();
        delta.tool_calls = Vec::new();

        for call in &state.tool_calls {
            let text = match serde_json::from_str::<Value>(&call.arguments) {
                Ok(args) => {
                    debug!(tool = %call.name, "executing tool call");
                    match self.registry.call(&call.name, args).await {
                        Ok(content) => content.text,
                        Err(e) => {
                            warn!(tool = %call.name, error = %e, "tool call failed");
                            format!("Error: {}\n Please fix your mistakes.", e)
                        }
                    }
                }
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "tool arguments are not valid JSON");
                    format!("Error: invalid arguments: {}\n Please fix your mistakes.", e)
                }
            };

            let call_id = call.id.clone().unwrap_or_default();
            delta.researcher_history.push(Message::tool(text, call_id));
        }

        Ok((delta, Next::Continue))
    }
}
