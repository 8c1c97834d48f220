//! Observability middleware: node logging and Langfuse tracing.

mod langfuse;
mod logging_middleware;

pub use langfuse::{LangfuseClient, LangfuseMiddleware};
pub use logging_middleware::LoggingNodeMiddleware;
