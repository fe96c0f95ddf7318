//! Table Editor - users, tables and rows behind a single state store
//!
//! All edits flow through one reducer:
//! - [`state::Action`] describes a transition
//! - [`state::reduce`] maps (state, action) to the next state without mutating its input
//! - [`state::Store`] owns the current snapshot, notifies subscribers and
//!   persists every change through a [`state::StateStorage`] backend
//!
//! Validation of user input lives outside the store in [`validation`]; the
//! reducer applies whatever fully formed payload it is given.

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod validation;

pub use config::EditorConfig;
pub use error::{Result, TableEditorError};
pub use model::{create_id, AppState, Row, Table, User};
pub use state::{reduce, Action, FileStorage, MemoryStorage, StateStorage, Store};
