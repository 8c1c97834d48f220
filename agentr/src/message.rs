//! Message types for agent state.
//!
//! Message roles: System (usually first in the list), User, Assistant, and Tool.
//! The Tool role carries the result of a tool execution together with the id of
//! the tool call that produced it, so the orchestrator/researcher handoff can be
//! correlated across turns.

/// A single message in the conversation.
///
/// Roles: system prompt, user input, assistant reply, tool result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model/agent reply.
    Assistant(String),
    /// Tool execution result, correlated to a tool call by `call_id`.
    Tool {
        content: String,
        call_id: String,
    },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Creates a tool result message correlated to `call_id`.
    pub fn tool(content: impl Into<String>, call_id: impl Into<String>) -> Self {
        Self::Tool {
            content: content.into(),
            call_id: call_id.into(),
        }
    }

    /// Returns the text content of the message regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) => s,
            Self::Tool { content, .. } => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: system/user/assistant/tool constructors produce the correct variant with content.
    #[test]
    fn message_constructors() {
        let sys = Message::system("s");
        assert!(matches!(&sys, Message::System(c) if c == "s"));
        let usr = Message::user("u");
        assert!(matches!(&usr, Message::User(c) if c == "u"));
        let ast = Message::assistant("a");
        assert!(matches!(&ast, Message::Assistant(c) if c == "a"));
        let tool = Message::tool("result", "call-1");
        assert!(
            matches!(&tool, Message::Tool { content, call_id } if content == "result" && call_id == "call-1")
        );
    }

    /// **Scenario**: content() returns the text for every variant.
    #[test]
    fn message_content_all_variants() {
        assert_eq!(Message::system("s").content(), "s");
        assert_eq!(Message::user("u").content(), "u");
        assert_eq!(Message::assistant("a").content(), "a");
        assert_eq!(Message::tool("t", "id").content(), "t");
    }

    /// **Scenario**: Each Message variant round-trips through serde.
    #[test]
    fn message_serialize_deserialize_roundtrip() {
        for msg in [
            Message::system("sys"),
            Message::user("usr"),
            Message::assistant("ast"),
            Message::tool("res", "call-1"),
        ] {
            let json = serde_json::to_string(&msg).expect("serialize");
            let back: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(msg.content(), back.content());
        }
    }
}
