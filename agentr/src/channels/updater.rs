//! State updater for custom state merge semantics.
//!
//! Models per-field update strategies: some fields are replaced by the node's
//! return value, others (message lists) are appended. The graph applies the
//! configured updater after every node execution.

use std::fmt::Debug;
use std::sync::Arc;

/// Trait for customizing how state updates are applied.
///
/// Implement this to define merge logic for a state type. The default
/// implementation ([`ReplaceUpdater`]) simply replaces the entire state.
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Apply an update to the current state.
    ///
    /// Called after each node execution to merge the node's output (`update`)
    /// into the current state.
    fn apply_update(&self, current: &mut S, update: &S);
}

/// Default state updater: the node's return value completely replaces the
/// previous state.
#[derive(Debug, Clone, Default)]
pub struct ReplaceUpdater;

impl<S> StateUpdater<S> for ReplaceUpdater
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        *current = update.clone();
    }
}

/// A state updater that applies updates field-by-field via a closure.
///
/// Allows different fields to have different update strategies (replace,
/// append, aggregate).
pub struct FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    updater_fn: F,
    _marker: std::marker::PhantomData<S>,
}

impl<S, F> Debug for FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBasedUpdater")
            .field("updater_fn", &"<function>")
            .finish()
    }
}

impl<S, F> FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    /// Creates a new FieldBasedUpdater with the given merge function.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use agentr::channels::FieldBasedUpdater;
    ///
    /// #[derive(Clone, Debug)]
    /// struct State { messages: Vec<String>, count: i32 }
    ///
    /// let updater = FieldBasedUpdater::new(|current: &mut State, update: &State| {
    ///     current.messages.extend(update.messages.iter().cloned());
    ///     current.count = update.count;
    /// });
    /// ```
    pub fn new(updater_fn: F) -> Self {
        Self {
            updater_fn,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, F> StateUpdater<S> for FieldBasedUpdater<S, F>
where
    S: Clone + Send + Sync + Debug + 'static,
    F: Fn(&mut S, &S) + Send + Sync + 'static,
{
    fn apply_update(&self, current: &mut S, update: &S) {
        (self.updater_fn)(current, update);
    }
}

/// Boxed state updater for type erasure.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;

/// Helper to create a boxed state updater.
pub fn boxed_updater<S, U>(updater: U) -> BoxedStateUpdater<S>
where
    S: Clone + Send + Sync + Debug + 'static,
    U: StateUpdater<S> + 'static,
{
    Arc::new(updater)
}
