//! Preprocessor node: seeds the conversation with the user's query.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::AgentState;

/// Turns the raw query into the first user message of the conversation.
pub struct Preprocessor;

#[async_trait]
impl Node<AgentState> for Preprocessor {
    fn id(&self) -> &str {
        "preprocessor"
    }

    async fn run(&self, state: AgentState) -> Result<(AgentState, Next), AgentError> {
        if state.query.is_empty() {
            return Err(AgentError::ExecutionFailed(
                "query not found in state".to_string(),
            ));
        }

        let mut delta = state.delta();
        delta.message_history.push(Message::user(&state.query));
        Ok((delta, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: A non-empty query becomes the first user message.
    #[tokio::test]
    async fn query_becomes_user_message() {
        let state = AgentState::for_query("what is rust?");
        let (delta, next) = Preprocessor.run(state).await.unwrap();
        assert_eq!(delta.message_history.len(), 1);
        assert!(matches!(&delta.message_history[0], Message::User(s) if s == "what is rust?"));
        assert!(matches!(next, Next::Continue));
    }

    /// **Scenario**: An empty query fails the run.
    #[tokio::test]
    async fn empty_query_fails() {
        let result = Preprocessor.run(AgentState::default()).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(_))));
    }
}
