//! The research agent: nodes, prompts, findings handling, and the runner.
//!
//! Graph shape: preprocessor → orchestrator; the orchestrator either ends the
//! run with a direct answer or delegates to the researcher, which loops with
//! the tool node until it finalizes (or hits the iteration cap) and reports
//! back to the orchestrator.

mod findings;
mod orchestrator;
mod preprocessor;
mod prompts;
mod researcher;
mod runner;
mod tool_node;

pub use findings::{format_research_synthesis, parse_research_results, ValidationError};
pub use orchestrator::Orchestrator;
pub use preprocessor::Preprocessor;
pub use researcher::Researcher;
pub use runner::{agent_state_updater, AgentOptions, AgentR};
pub use tool_node::ToolNode;
