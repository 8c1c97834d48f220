//! In-memory checkpointer (MemorySaver).
//!
//! Not persistent; lives for the process only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::checkpoint::{Checkpoint, CheckpointListItem, CheckpointMetadata};
use crate::memory::checkpointer::{CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

/// In-memory checkpointer. Key: (thread_id, checkpoint_ns); each thread has a
/// list of checkpoints, newest last.
///
/// **Interaction**: Used as `Arc<dyn Checkpointer<S>>` in
/// `StateGraph::compile_with_checkpointer`.
pub struct MemorySaver<S> {
    inner: Arc<RwLock<MemorySaverInner<S>>>,
}

struct MemorySaverInner<S> {
    /// Key: format!("{}:{}", thread_id, checkpoint_ns).
    by_thread: HashMap<String, Vec<(String, Checkpoint<S>)>>,
}

impl<S> MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates a new in-memory checkpointer.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemorySaverInner {
                by_thread: HashMap::new(),
            })),
        }
    }

    fn thread_key(config: &RunnableConfig) -> Result<String, CheckpointError> {
        let thread_id = config
            .thread_id
            .as_deref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        Ok(format!("{}:{}", thread_id, config.checkpoint_ns))
    }

    /// Drops all checkpoints for a thread across every namespace.
    pub async fn delete_thread(&self, thread_id: &str) {
        let prefix = format!("{}:", thread_id);
        let mut guard = self.inner.write().await;
        guard.by_thread.retain(|k, _| !k.starts_with(&prefix));
    }
}

impl<S> Default for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = Self::thread_key(config)?;
        let id = checkpoint.id.clone();
        let cp = checkpoint.clone();
        let mut guard = self.inner.write().await;
        guard
            .by_thread
            .entry(key)
            .or_default()
            .push((id.clone(), cp));
        Ok(id)
    }

    async fn get_tuple(
        &self,
        config: &RunnableConfig,
    ) -> Result<Option<(Checkpoint<S>, CheckpointMetadata)>, CheckpointError> {
        let key = Self::thread_key(config)?;
        let guard = self.inner.read().await;
        let list = match guard.by_thread.get(&key) {
            Some(l) if !l.is_empty() => l,
            _ => return Ok(None),
        };
        let result = if let Some(cid) = &config.checkpoint_id {
            list.iter()
                .find(|(id, _)| id == cid)
                .map(|(_, cp)| (cp.clone(), cp.metadata.clone()))
        } else {
            list.last().map(|(_, cp)| (cp.clone(), cp.metadata.clone()))
        };
        Ok(result)
    }

    async fn list(
        &self,
        config: &RunnableConfig,
        limit: Option<usize>,
    ) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let key = Self::thread_key(config)?;
        let guard = self.inner.read().await;
        let list = match guard.by_thread.get(&key) {
            Some(l) => l,
            None => return Ok(Vec::new()),
        };
        let mut items: Vec<CheckpointListItem> = list
            .iter()
            .map(|(id, cp)| CheckpointListItem {
                checkpoint_id: id.clone(),
                metadata: cp.metadata.clone(),
            })
            .collect();
        if let Some(n) = limit {
            let len = items.len();
            if len > n {
                items = items[len - n..].to_vec();
            }
        }
        Ok(items)
    }
}
