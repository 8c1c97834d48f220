//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works against the real OpenAI API or any compatible endpoint via a custom
//! base URL. Tools can be bound per call through `invoke_with_tools`; when
//! present, the API may return `tool_calls` in the response.

use async_trait::async_trait;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ToolChoiceMode};
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionToolChoiceOption, ChatCompletionTools, CreateChatCompletionRequestArgs,
        FunctionObject, ToolChoiceOptions,
    },
    Client,
};

/// OpenAI Chat Completions client implementing `LlmClient`.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide an
/// explicit key and base URL via `ChatOpenAI::with_config`.
///
/// **Interaction**: Implements `LlmClient`; used by the orchestrator and
/// researcher nodes.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Convert our `Message` list to OpenAI request messages.
    ///
    /// Tool results are rendered as user messages carrying the tool output, so
    /// the request never depends on tool_call ids the endpoint did not issue in
    /// the same exchange.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
                Message::Tool { content, .. } => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(
                        format!("Tool result: {}", content).as_str(),
                    ),
                ),
            })
            .collect()
    }

    async fn create(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        tool_choice: Option<ToolChoiceMode>,
    ) -> Result<LlmResponse, AgentError> {
        let trace_id = Uuid::new_v4().to_string();
        let openai_messages = Self::messages_to_request(messages);
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(openai_messages);

        if !tools.is_empty() {
            let chat_tools: Vec<ChatCompletionTools> = tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            args.tools(chat_tools);

            let opt = match tool_choice.unwrap_or_default() {
                ToolChoiceMode::Auto => ToolChoiceOptions::Auto,
                ToolChoiceMode::None => ToolChoiceOptions::None,
                ToolChoiceMode::Required => ToolChoiceOptions::Required,
            };
            args.tool_choice(ChatCompletionToolChoiceOption::Mode(opt));
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        debug!(
            trace_id = %trace_id,
            model = %self.model,
            message_count = messages.len(),
            tools_count = tools.len(),
            temperature = ?self.temperature,
            tool_choice = ?tool_choice,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }

        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        name: f.function.name,
                        arguments: f.function.arguments,
                        id: Some(f.id),
                    })
                } else {
                    None
                }
            })
            .collect();

        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
        })
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.create(messages, &[], None).await
    }

    async fn invoke_with_tools(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        tool_choice: ToolChoiceMode,
    ) -> Result<LlmResponse, AgentError> {
        self.create(messages, tools, Some(tool_choice)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Tool messages are rendered as user messages with a
    /// "Tool result:" prefix so requests stay valid without matching
    /// assistant tool_call ids.
    #[test]
    fn tool_message_renders_as_user() {
        let messages = vec![Message::tool("42 results", "call-1")];
        let request = ChatOpenAI::messages_to_request(&messages);
        assert_eq!(request.len(), 1);
        match &request[0] {
            ChatCompletionRequestMessage::User(_) => {}
            other => panic!("expected user message, got {:?}", other),
        }
    }

    /// **Scenario**: System, user, and assistant messages map to their
    /// respective request variants in order.
    #[test]
    fn roles_map_in_order() {
        let messages = vec![
            Message::system("sys"),
            Message::user("hi"),
            Message::assistant("hello"),
        ];
        let request = ChatOpenAI::messages_to_request(&messages);
        assert!(matches!(
            request[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(request[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(
            request[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
    }
}
