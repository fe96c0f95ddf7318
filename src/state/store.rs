//! State Store
//!
//! Owns the single application state tree. Every dispatched action is
//! reduced into a new snapshot, subscribers are told about it, and the
//! snapshot is persisted through the store's [`StateStorage`].

use std::fmt;

use log::{debug, warn};

use crate::error::Result;
use crate::model::AppState;
use crate::state::action::Action;
use crate::state::persistence::{persist, restore};
use crate::state::reducer::reduce;
use crate::state::storage::StateStorage;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&AppState)>;

/// Owned state container with dispatch, snapshot reads and change callbacks.
pub struct Store<S: StateStorage> {
    /// Current snapshot.
    state: AppState,

    /// Where snapshots are persisted after each change.
    storage: S,

    /// Change callbacks in subscription order.
    subscribers: Vec<(SubscriptionId, Subscriber)>,

    next_subscription: u64,
}

impl<S: StateStorage> Store<S> {
    /// Create a store with an explicit initial state. Nothing is written
    /// until the first dispatch.
    pub fn new(state: AppState, storage: S) -> Self {
        Self {
            state,
            storage,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a store whose initial state is restored from `storage`,
    /// falling back to the empty state if nothing usable is stored.
    pub fn open(storage: S) -> Self {
        let state = restore(&storage);
        Self::new(state, storage)
    }

    /// Current snapshot.
    pub fn get_state(&self) -> &AppState {
        &self.state
    }

    /// Reduce `action` into a new snapshot, notify subscribers, then persist.
    ///
    /// Unknown actions leave the state untouched and skip notification and
    /// persistence. If persisting fails the new state is kept in memory and
    /// the storage error is returned.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        if let Action::Unknown(kind) = &action {
            debug!("Ignoring unknown action: {}", kind);
            return Ok(());
        }

        debug!("Dispatching {}", action.kind());
        self.state = reduce(&self.state, &action);

        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.state);
        }

        persist(&mut self.storage, &self.state).map_err(|e| {
            warn!("Failed to persist state after {}: {}", action.kind(), e);
            e
        })
    }

    /// Register a callback invoked with the new snapshot after every change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Write the current snapshot to storage without dispatching.
    pub fn flush(&mut self) -> Result<()> {
        persist(&mut self.storage, &self.state)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: StateStorage + fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("storage", &self.storage)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
