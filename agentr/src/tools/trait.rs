//! The `Tool` trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{ToolCallContent, ToolSourceError, ToolSpec};

/// A callable tool: name, spec for the model, and an async call.
///
/// **Interaction**: Registered in `ToolRegistry`; executed by the tool node
/// with the arguments the model produced.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name (matches `spec().name`).
    fn name(&self) -> &str;

    /// Spec handed to the model for tool binding.
    fn spec(&self) -> ToolSpec;

    /// Execute the tool with JSON arguments.
    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError>;
}
