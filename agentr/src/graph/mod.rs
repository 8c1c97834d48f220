//! State graph: build with nodes + edges, compile, invoke or stream.
//!
//! - [`StateGraph`]: builder — `add_node`, `add_edge(from, to)` with [`START`] /
//!   [`END`], `add_conditional_edges` for state-based routing.
//! - [`CompiledStateGraph`]: executable graph produced by `compile()`; supports
//!   `invoke` and `stream`, optional checkpointing and node middleware.
//! - [`Node`]: one step — state in, (state out, [`Next`]) out.

mod compile_error;
mod compiled;
mod conditional;
pub mod logging;
mod next;
mod node;
mod node_middleware;
mod run_context;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use next::Next;
pub use node::Node;
pub use node_middleware::NodeMiddleware;
pub use run_context::RunContext;
pub use state_graph::{StateGraph, END, START};
