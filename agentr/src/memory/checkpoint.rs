//! Checkpoint and metadata types.
//!
//! Checkpoint (id, ts, channel_values, metadata).

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Current version of checkpoint format.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Metadata for a single checkpoint (source, step, created_at).
///
/// Used by Checkpointer implementations and by list() for history.
#[derive(Debug, Clone, Default)]
pub struct CheckpointMetadata {
    /// The source of the checkpoint (input, loop, update).
    pub source: CheckpointSource,
    /// The step number of the checkpoint (-1 for input, 0 for first loop, etc.).
    pub step: i64,
    /// Timestamp when this checkpoint was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Source of the checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckpointSource {
    /// Created from an input to invoke/stream.
    #[default]
    Input,
    /// Created from inside the run loop.
    Loop,
    /// Created from a state update at the end of a run.
    Update,
}

/// Snapshot of graph state at a point in a thread.
///
/// **Interaction**: Created by `Checkpoint::from_state` at the end of a run
/// and written via `Checkpointer::put`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    /// The version of the checkpoint format. Currently `1`.
    pub v: u32,
    /// The ID of the checkpoint. Unique per checkpoint.
    pub id: String,
    /// The timestamp of the checkpoint in RFC 3339 format.
    pub ts: String,
    /// The values of the channels at the time of the checkpoint (graph state).
    pub channel_values: S,
    /// Metadata for the checkpoint.
    pub metadata: CheckpointMetadata,
}

/// Item returned by Checkpointer::list for history.
#[derive(Debug, Clone)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Creates a checkpoint from current state for saving after invoke.
    pub fn from_state(state: S, source: CheckpointSource, step: i64) -> Self {
        let now = Utc::now();
        Self {
            v: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            ts: now.to_rfc3339(),
            channel_values: state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: from_state fills version, a UUID id, an RFC 3339 timestamp,
    /// and metadata from the arguments.
    #[test]
    fn checkpoint_from_state_fills_fields() {
        let checkpoint: Checkpoint<String> =
            Checkpoint::from_state("test state".to_string(), CheckpointSource::Loop, 1);

        assert_eq!(checkpoint.v, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.channel_values, "test state");
        assert_eq!(checkpoint.metadata.source, CheckpointSource::Loop);
        assert_eq!(checkpoint.metadata.step, 1);
        assert!(checkpoint.metadata.created_at.is_some());

        // UUID format: 8-4-4-4-12 (36 chars with hyphens)
        let parts: Vec<&str> = checkpoint.id.split('-').collect();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0].len(), 8);
        assert_eq!(parts[4].len(), 12);

        assert!(checkpoint.ts.contains('T'));
    }

    /// **Scenario**: Multiple checkpoints have unique IDs.
    #[test]
    fn checkpoint_unique_ids() {
        let cp1: Checkpoint<i32> = Checkpoint::from_state(1, CheckpointSource::Input, -1);
        let cp2: Checkpoint<i32> = Checkpoint::from_state(2, CheckpointSource::Loop, 0);
        let cp3: Checkpoint<i32> = Checkpoint::from_state(3, CheckpointSource::Update, 1);

        assert_ne!(cp1.id, cp2.id);
        assert_ne!(cp2.id, cp3.id);
        assert_ne!(cp1.id, cp3.id);
    }

    /// **Scenario**: All CheckpointSource variants are Debug/Clone and can be used in metadata.
    #[test]
    fn checkpoint_source_all_variants() {
        let _ = CheckpointSource::Input;
        let _ = CheckpointSource::Loop;
        let s = CheckpointSource::Update;
        let _ = format!("{:?}", s);
        let _ = CheckpointMetadata {
            source: s.clone(),
            step: 0,
            created_at: None,
        };
    }
}
