//! AgentR CLI binary: run the research agent on one query.
//!
//! Usage: `agentr <QUERY> [TRACING]` where TRACING is an optional boolean
//! (`true/false`, `1/0`, `yes/no`, case-insensitive) enabling Langfuse tracing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tokio_stream::StreamExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use agentr::agent::{AgentOptions, AgentR};
use agentr::config::EnvConfig;
use agentr::graph::NodeMiddleware;
use agentr::llm::ChatOpenAI;
use agentr::memory::DEFAULT_MAX_ITERATIONS;
use agentr::state::AgentState;
use agentr::stream::StreamEvent;
use agentr::tools::default_registry;
use agentr::trace::{LangfuseClient, LangfuseMiddleware, LoggingNodeMiddleware};

#[derive(Parser, Debug)]
#[command(name = "agentr")]
#[command(about = "AgentR — run the research agent from CLI")]
struct Args {
    /// The research query.
    query: String,

    /// Enable Langfuse tracing (true/false, 1/0, yes/no).
    #[arg(value_parser = parse_tracing_flag)]
    tracing: Option<bool>,

    /// Thread ID for conversation continuity.
    #[arg(long, value_name = "ID", default_value = "default")]
    thread_id: String,

    /// Cap on research loop iterations.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// Stream per-node updates instead of printing only the final answer.
    #[arg(short, long)]
    stream: bool,

    /// Verbose logging (overrides LOG_LEVEL with debug).
    #[arg(short, long)]
    verbose: bool,
}

/// Parses the optional tracing argument: true/false, 1/0, yes/no, any case.
fn parse_tracing_flag(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!(
            "invalid tracing flag: {} (use true/false, 1/0, yes/no)",
            other
        )),
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn middleware_for(
    tracing_enabled: bool,
    env: &EnvConfig,
) -> Arc<dyn NodeMiddleware<AgentState>> {
    if tracing_enabled && env.langfuse_configured() {
        let client = LangfuseClient::new(
            &env.langfuse_base_url,
            &env.langfuse_public_key,
            &env.langfuse_secret_key,
        );
        info!("Langfuse tracing enabled");
        Arc::new(LangfuseMiddleware::new(client, "agentr"))
    } else {
        Arc::new(LoggingNodeMiddleware::default())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // env > .env > ~/.config/agentr/config.toml
    config::load_and_apply("agentr", None)?;

    let level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    };
    init_logging(&level);

    let env = EnvConfig::from_env()?;
    if args.tracing == Some(true) && !env.langfuse_configured() {
        eprintln!("warning: tracing requested but LANGFUSE_* variables are not set");
    }

    let client = Arc::new(
        ChatOpenAI::with_config(env.openai_config(), &env.model_name).with_temperature(0.0),
    );

    let agent = AgentR::new(
        client,
        default_registry(&env),
        AgentOptions {
            thread_id: args.thread_id,
            max_iterations: args.max_iterations,
            middleware: Some(middleware_for(args.tracing.unwrap_or(false), &env)),
            ..Default::default()
        },
    )?;

    let start = Instant::now();
    info!(query_chars = args.query.len(), "processing query");

    if args.stream {
        let mut stream = agent.stream(&args.query).await;
        while let Some(event) = stream.next().await {
            if let StreamEvent::Updates { node_id, state } = event {
                if node_id == "orchestrator" && !state.response.is_empty() {
                    println!("{}", state.response);
                } else {
                    eprintln!("[{}]", node_id);
                }
            }
        }
        info!(elapsed = %format_elapsed(start.elapsed()), "query completed");
        return Ok(());
    }

    match agent.invoke(&args.query).await {
        Ok(answer) => {
            info!(elapsed = %format_elapsed(start.elapsed()), "query completed");
            println!("{}", answer);
            Ok(())
        }
        Err(e) => {
            error!(elapsed = %format_elapsed(start.elapsed()), error = %e, "query failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: The tracing flag accepts true/false, 1/0, yes/no in any case.
    #[test]
    fn tracing_flag_accepts_booleans() {
        for s in ["true", "TRUE", "1", "yes", "Yes"] {
            assert_eq!(parse_tracing_flag(s), Ok(true), "{}", s);
        }
        for s in ["false", "False", "0", "no", "NO"] {
            assert_eq!(parse_tracing_flag(s), Ok(false), "{}", s);
        }
        assert!(parse_tracing_flag("maybe").is_err());
        assert!(parse_tracing_flag("").is_err());
    }

    /// **Scenario**: Elapsed durations are logged with two decimal places in seconds.
    #[test]
    fn elapsed_formats_as_seconds() {
        assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_elapsed(Duration::from_millis(42)), "0.04s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00s");
    }

    /// **Scenario**: Query is positional; tracing flag and options parse together.
    #[test]
    fn args_parse_query_and_flags() {
        let args = Args::parse_from(["agentr", "what is rust?", "yes", "--thread-id", "t1"]);
        assert_eq!(args.query, "what is rust?");
        assert_eq!(args.tracing, Some(true));
        assert_eq!(args.thread_id, "t1");
        assert_eq!(args.max_iterations, DEFAULT_MAX_ITERATIONS);

        let args = Args::parse_from(["agentr", "q"]);
        assert_eq!(args.tracing, None);
        assert_eq!(args.thread_id, "default");
    }
}
