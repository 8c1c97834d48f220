//! Central registry for managing a collection of tools.

use std::collections::HashMap;

use serde_json::Value;

use crate::tools::r#trait::Tool;
use crate::tools::{ToolCallContent, ToolSourceError, ToolSpec};

/// Stores tools by name and provides registration, listing, and calling.
///
/// **Interaction**: Built by the agent at startup; the researcher binds
/// `list()` into its LLM calls and the tool node executes via `call()`.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Specs of all registered tools.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| t.spec()).collect()
    }

    /// Executes the named tool with the given arguments.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "echo".to_string(),
                description: Some("Echoes the input".to_string()),
                input_schema: json!({"type": "object"}),
            }
        }
        async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
            Ok(ToolCallContent {
                text: args.to_string(),
            })
        }
    }

    /// **Scenario**: register then list exposes the tool's spec; call executes it.
    #[tokio::test]
    async fn register_list_and_call() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool));

        let specs = registry.list();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "echo");

        let out = registry.call("echo", json!({"a": 1})).await.unwrap();
        assert_eq!(out.text, r#"{"a":1}"#);
    }

    /// **Scenario**: Calling an unregistered tool name fails with NotFound.
    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let registry = ToolRegistry::new();
        let err = registry.call("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolSourceError::NotFound(_)));
    }
}
