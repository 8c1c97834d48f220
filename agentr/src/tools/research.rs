//! Delegation tool for the orchestrator.
//!
//! `research_sub_agent` is a handoff: the orchestrator binds its spec so the
//! model can produce a tool call carrying subtasks, and the graph routes to
//! the researcher. Calling it directly just echoes the subtasks back, so a
//! registry execution of the handoff stays harmless.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tools::r#trait::Tool;
use crate::tools::{ToolCallContent, ToolSourceError, ToolSpec};

/// Name the orchestrator's model uses to delegate research.
pub const RESEARCH_TOOL_NAME: &str = "research_sub_agent";

/// Spec for the research delegation tool.
pub fn research_subagent_spec() -> ToolSpec {
    ToolSpec {
        name: RESEARCH_TOOL_NAME.to_string(),
        description: Some(
            "Use this tool to delegate research to a sub-agent. Provide independent subtasks \
             that together answer the user's question."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "subtasks": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Independent research subtasks",
                }
            },
            "required": ["subtasks"],
        }),
    }
}

/// The delegation handoff as a registered tool: echoes `{subtasks}` back.
#[derive(Debug, Default)]
pub struct ResearchSubAgentTool;

#[async_trait]
impl Tool for ResearchSubAgentTool {
    fn name(&self) -> &str {
        RESEARCH_TOOL_NAME
    }

    fn spec(&self) -> ToolSpec {
        research_subagent_spec()
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let subtasks = args
            .get("subtasks")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ToolSourceError::InvalidInput("subtasks must be an array of strings".to_string())
            })?;
        if subtasks.iter().any(|s| !s.is_string()) {
            return Err(ToolSourceError::InvalidInput(
                "subtasks must be an array of strings".to_string(),
            ));
        }

        let echo = json!({ "subtasks": subtasks });
        let text = serde_json::to_string(&echo)
            .map_err(|e| ToolSourceError::InvalidInput(e.to_string()))?;
        Ok(ToolCallContent { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: The delegation spec names research_sub_agent and requires
    /// a subtasks array.
    #[test]
    fn spec_requires_subtasks_array() {
        let spec = research_subagent_spec();
        assert_eq!(spec.name, "research_sub_agent");
        assert_eq!(
            spec.input_schema["properties"]["subtasks"]["type"],
            "array"
        );
        assert_eq!(spec.input_schema["required"][0], "subtasks");
    }

    /// **Scenario**: Calling the handoff tool echoes the subtasks back as JSON.
    #[tokio::test]
    async fn call_echoes_subtasks() {
        let tool = ResearchSubAgentTool;
        let content = tool
            .call(json!({"subtasks": ["find the release date", "find the changelog"]}))
            .await
            .unwrap();
        let echoed: Value = serde_json::from_str(&content.text).unwrap();
        assert_eq!(echoed["subtasks"][0], "find the release date");
        assert_eq!(echoed["subtasks"][1], "find the changelog");
    }

    /// **Scenario**: Missing or non-string subtasks are rejected as invalid input.
    #[tokio::test]
    async fn call_rejects_bad_subtasks() {
        let tool = ResearchSubAgentTool;
        assert!(matches!(
            tool.call(json!({})).await,
            Err(ToolSourceError::InvalidInput(_))
        ));
        assert!(matches!(
            tool.call(json!({"subtasks": [1, 2]})).await,
            Err(ToolSourceError::InvalidInput(_))
        ));
    }
}
