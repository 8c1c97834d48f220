//! Checkpoint persistence for conversation threads.
//!
//! A `Checkpointer` saves and loads graph state by `(thread_id, checkpoint_ns)`
//! so that repeated invocations on the same thread carry the message history
//! forward. `MemorySaver` is the in-memory implementation.

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;

pub use checkpoint::{
    Checkpoint, CheckpointListItem, CheckpointMetadata, CheckpointSource, CHECKPOINT_VERSION,
};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::{RunnableConfig, DEFAULT_MAX_ITERATIONS};
pub use memory_saver::MemorySaver;
