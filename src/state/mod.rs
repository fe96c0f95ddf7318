//! State Management Module
//!
//! Provides actions, the reducer, the owned store, and snapshot persistence
//! over pluggable storage backends.

pub mod action;
pub mod persistence;
pub mod reducer;
pub mod storage;
pub mod store;

pub use action::{Action, RowChange, RowRef, TableRename, ACTION_KINDS};
pub use reducer::reduce;
pub use storage::{FileStorage, MemoryStorage, StateStorage, STORAGE_KEY};
pub use store::{Store, SubscriptionId};
