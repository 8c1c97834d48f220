//! AgentR: a plan-and-execute research agent.
//!
//! An orchestrator decides whether to answer a query directly or delegate to
//! a researcher, which loops over web search until it can report back. The
//! loop runs on a small state graph with conditional routing, per-thread
//! in-memory checkpointing, streaming, and optional Langfuse tracing.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentr::agent::{AgentOptions, AgentR};
//! use agentr::llm::ChatOpenAI;
//! use agentr::tools::{ToolRegistry, WebSearchTool};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ChatOpenAI::new("gpt-4o-mini"));
//! let mut tools = ToolRegistry::new();
//! tools.register(Box::new(WebSearchTool::new("tavily-key")));
//!
//! let agent = AgentR::new(client, tools, AgentOptions::default())?;
//! let answer = agent.invoke("What is new in Rust?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod channels;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod state;
pub mod stream;
pub mod tools;
pub mod trace;

pub use error::AgentError;
pub use message::Message;
pub use state::AgentState;
