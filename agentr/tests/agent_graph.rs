//! End-to-end runs of the research agent graph with a scripted model.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use agentr::agent::{AgentOptions, AgentR};
use agentr::error::AgentError;
use agentr::llm::{LlmResponse, MockLlm};
use agentr::message::Message;
use agentr::tools::{Tool, ToolCallContent, ToolRegistry, ToolSourceError, ToolSpec};

/// Search tool that returns a fixed source list without hitting the network.
struct FakeSearchTool;

#[async_trait]
impl Tool for FakeSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "web_search".to_string(),
            description: Some("Search the web".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"],
            }),
        }
    }

    async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolSourceError> {
        Ok(ToolCallContent {
            text: r#"[{"source": "https://rust-lang.org", "content": "Rust 1.80 released", "type": "web"}]"#
                .to_string(),
        })
    }
}

fn agent_with(script: Vec<LlmResponse>, options: AgentOptions) -> AgentR {
    let mut tools = ToolRegistry::new();
    tools.register(Box::new(FakeSearchTool));
    AgentR::new(Arc::new(MockLlm::scripted(script)), tools, options).expect("graph compiles")
}

fn delegate_response() -> LlmResponse {
    MockLlm::tool_call_response(
        "research_sub_agent",
        r#"{"subtasks": ["find the latest rust release"]}"#,
        "call-orch",
    )
}

fn search_response(call_id: &str) -> LlmResponse {
    MockLlm::tool_call_response("web_search", r#"{"query": "latest rust release"}"#, call_id)
}

/// **Scenario**: A query the orchestrator answers directly ends the run with
/// that answer and no research.
#[tokio::test]
async fn direct_answer_without_research() {
    let agent = agent_with(
        vec![LlmResponse::text("Rust is a systems language.")],
        AgentOptions::default(),
    );

    let answer = agent.invoke("what is rust?").await.unwrap();
    assert_eq!(answer, "Rust is a systems language.");

    let history = agent.message_history().await;
    assert_eq!(history.len(), 2);
    assert!(matches!(&history[0], Message::User(_)));
    assert!(matches!(&history[1], Message::Assistant(_)));
}

/// **Scenario**: Delegation runs the full loop: orchestrator → researcher →
/// tool node → researcher report → orchestrator final answer.
#[tokio::test]
async fn delegated_research_produces_final_answer() {
    let agent = agent_with(
        vec![
            delegate_response(),
            search_response("call-s1"),
            LlmResponse::text("Report: Rust 1.80 is the latest release."),
            LlmResponse::text("The latest Rust release is 1.80."),
        ],
        AgentOptions::default(),
    );

    let answer = agent.invoke("what is the latest rust release?").await.unwrap();
    assert_eq!(answer, "The latest Rust release is 1.80.");

    // user, orchestrator delegation turn, researcher report handoff, final answer
    let history = agent.message_history().await;
    assert_eq!(history.len(), 4);
    assert!(matches!(
        &history[2],
        Message::Tool { call_id, .. } if call_id == "call-orch"
    ));
}

/// **Scenario**: A search backend failure does not abort the run: the error
/// lands in the researcher's history as a tool message and the loop goes on
/// to a final answer.
#[tokio::test]
async fn failing_search_tool_still_reaches_an_answer() {
    struct DownSearchTool;

    #[async_trait]
    impl Tool for DownSearchTool {
        fn name(&self) -> &str {
            "web_search"
        }

        fn spec(&self) -> ToolSpec {
            FakeSearchTool.spec()
        }

        async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolSourceError> {
            Err(ToolSourceError::Transport("search backend down".into()))
        }
    }

    let mut tools = ToolRegistry::new();
    tools.register(Box::new(DownSearchTool));
    let agent = AgentR::new(
        Arc::new(MockLlm::scripted(vec![
            delegate_response(),
            search_response("call-s1"),
            LlmResponse::text("Report: the search backend was unavailable."),
            LlmResponse::text("I could not research this right now."),
        ])),
        tools,
        AgentOptions::default(),
    )
    .expect("graph compiles");

    let answer = agent.invoke("what is the latest rust release?").await.unwrap();
    assert_eq!(answer, "I could not research this right now.");
}

/// **Scenario**: When the iteration cap is hit, the researcher reports a
/// synthesis of collected sources and the orchestrator still answers.
#[tokio::test]
async fn iteration_cap_synthesizes_sources() {
    let agent = agent_with(
        vec![
            delegate_response(),
            search_response("call-s1"),
            search_response("call-s2"),
            LlmResponse::text("Answer based on partial research."),
        ],
        AgentOptions {
            max_iterations: 1,
            ..Default::default()
        },
    );

    let answer = agent.invoke("deep question").await.unwrap();
    assert_eq!(answer, "Answer based on partial research.");

    let history = agent.message_history().await;
    let report = history
        .iter()
        .find_map(|m| match m {
            Message::Tool { content, .. } => Some(content.clone()),
            _ => None,
        })
        .expect("research handoff present");
    assert!(report.contains("Research Complete"), "{}", report);
    assert!(report.contains("Total Sources: 1"), "{}", report);
}

/// **Scenario**: With memory enabled, the second invoke on the same thread
/// carries the earlier conversation forward.
#[tokio::test]
async fn memory_carries_history_across_invokes() {
    let agent = agent_with(
        vec![
            LlmResponse::text("First answer."),
            LlmResponse::text("Second answer."),
        ],
        AgentOptions::default(),
    );

    agent.invoke("first question").await.unwrap();
    agent.invoke("second question").await.unwrap();

    let history = agent.message_history().await;
    assert_eq!(history.len(), 4);
    assert!(matches!(&history[0], Message::User(s) if s == "first question"));
    assert!(matches!(&history[2], Message::User(s) if s == "second question"));

    agent.clear_memory().await;
    assert!(agent.message_history().await.is_empty());
}

/// **Scenario**: Memory disabled: nothing persists between invokes.
#[tokio::test]
async fn no_memory_keeps_threads_clean() {
    let agent = agent_with(
        vec![LlmResponse::text("Answer.")],
        AgentOptions {
            enable_memory: false,
            ..Default::default()
        },
    );

    agent.invoke("question").await.unwrap();
    assert!(agent.message_history().await.is_empty());
    assert!(agent.state().await.is_none());
}

/// **Scenario**: An empty model answer surfaces as EmptyResponse.
#[tokio::test]
async fn empty_model_answer_is_an_error() {
    let agent = agent_with(vec![LlmResponse::text("")], AgentOptions::default());
    let result = agent.invoke("question").await;
    assert!(matches!(result, Err(AgentError::EmptyResponse)));
}
