//! State update channels: how node outputs are merged into graph state.
//!
//! By default a node's return value replaces the whole state. The research
//! graph instead appends to its history fields (see
//! [`agent_state_updater`](crate::agent::agent_state_updater)) while replacing
//! everything else, so nodes can return partial history updates.

mod updater;

pub use updater::{boxed_updater, BoxedStateUpdater, FieldBasedUpdater, ReplaceUpdater, StateUpdater};
