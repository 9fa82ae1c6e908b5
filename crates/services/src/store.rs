//! Reducer-driven state container shared by every resource.

use tokio::sync::watch;

/// A state value that evolves only through named actions.
///
/// `reduce` consumes the old value and returns its replacement; snapshots
/// handed out earlier never change underneath their holders.
pub trait Reducer: Clone + Send + Sync + 'static {
    type Action: Send;

    #[must_use]
    fn reduce(self, action: Self::Action) -> Self;
}

/// Holds the current state of one resource and publishes each replacement.
pub struct Store<S: Reducer> {
    state: watch::Sender<S>,
}

impl<S: Reducer + Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Reducer> Store<S> {
    #[must_use]
    pub fn new(initial: S) -> Self {
        Self {
            state: watch::Sender::new(initial),
        }
    }

    pub fn dispatch(&self, action: S::Action) {
        self.state.send_modify(|state| {
            let current = state.clone();
            *state = current.reduce(action);
        });
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver notified on every dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// Dispatch `action` when the returned guard is dropped, however the
    /// surrounding operation ends (early return, error, or cancellation).
    #[must_use]
    pub fn dispatch_on_drop(&self, action: S::Action) -> DispatchOnDrop<'_, S> {
        DispatchOnDrop {
            store: self,
            action: Some(action),
        }
    }
}

pub struct DispatchOnDrop<'a, S: Reducer> {
    store: &'a Store<S>,
    action: Option<S::Action>,
}

impl<S: Reducer> Drop for DispatchOnDrop<'_, S> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            self.store.dispatch(action);
        }
    }
}
