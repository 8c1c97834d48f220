//! Langfuse tracing middleware.
//!
//! Sends one trace per agent construction and one span per node run to the
//! Langfuse ingestion API. Ingestion failures are logged and never fail the
//! graph run.

use std::fmt::Debug;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AgentError;
use crate::graph::{Next, NodeMiddleware};

/// Minimal Langfuse ingestion client (batch endpoint, basic auth).
pub struct LangfuseClient {
    http: reqwest::Client,
    base_url: String,
    public_key: String,
    secret_key: String,
}

impl LangfuseClient {
    pub fn new(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Posts a batch of ingestion events. Returns Err on transport or non-2xx.
    async fn ingest(&self, events: Vec<Value>) -> Result<(), String> {
        let url = format!(
            "{}/api/public/ingestion",
            self.base_url.trim_end_matches('/')
        );
        let res = self
            .http
            .post(&url)
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .json(&json!({ "batch": events }))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !res.status().is_success() {
            return Err(format!("Langfuse ingestion error {}", res.status()));
        }
        Ok(())
    }
}

fn event(event_type: &str, body: Value) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "type": event_type,
        "timestamp": Utc::now().to_rfc3339(),
        "body": body,
    })
}

/// Middleware that records each node run as a Langfuse span under one trace.
pub struct LangfuseMiddleware {
    client: LangfuseClient,
    trace_id: String,
    trace_name: String,
    trace_created: AtomicBool,
}

impl LangfuseMiddleware {
    pub fn new(client: LangfuseClient, trace_name: impl Into<String>) -> Self {
        Self {
            client,
            trace_id: Uuid::new_v4().to_string(),
            trace_name: trace_name.into(),
            trace_created: AtomicBool::new(false),
        }
    }

    /// The trace-create event, emitted with the first span.
    fn trace_event(&self) -> Value {
        event(
            "trace-create",
            json!({
                "id": self.trace_id,
                "name": self.trace_name,
                "timestamp": Utc::now().to_rfc3339(),
            }),
        )
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LangfuseMiddleware
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: Box<
            dyn FnOnce(
                    S,
                ) -> Pin<
                    Box<dyn std::future::Future<Output = Result<(S, Next), AgentError>> + Send>,
                > + Send,
        >,
    ) -> Result<(S, Next), AgentError> {
        let start = Utc::now();
        let result = inner(state).await;
        let end = Utc::now();

        let mut span_body = json!({
            "id": Uuid::new_v4().to_string(),
            "traceId": self.trace_id,
            "name": node_id,
            "startTime": start.to_rfc3339(),
            "endTime": end.to_rfc3339(),
        });
        if let Err(e) = &result {
            span_body["level"] = json!("ERROR");
            span_body["statusMessage"] = json!(e.to_string());
        }

        let mut events = Vec::new();
        if !self.trace_created.swap(true, Ordering::SeqCst) {
            events.push(self.trace_event());
        }
        events.push(event("span-create", span_body));

        match self.client.ingest(events).await {
            Ok(()) => debug!(node = %node_id, trace_id = %self.trace_id, "span sent"),
            Err(e) => warn!(node = %node_id, error = %e, "Langfuse ingestion failed"),
        }

        result
    }
}
