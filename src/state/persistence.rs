//! Persistence Adapter
//!
//! Converts between [`AppState`] and the JSON bytes kept in a
//! [`StateStorage`]. There is no schema versioning: a snapshot that does not
//! parse as the current shape is discarded in favour of the empty state.

use log::{info, warn};

use crate::error::Result;
use crate::model::AppState;
use crate::state::storage::StateStorage;

/// Serialize a state snapshot to its persisted JSON form.
pub fn serialize(state: &AppState) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(state)?)
}

/// Parse a persisted JSON snapshot.
pub fn deserialize(bytes: &[u8]) -> Result<AppState> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read the initial state from storage.
///
/// Falls back to `AppState::default()` when nothing is stored, when the read
/// fails, or when the stored bytes do not parse. Never fails.
pub fn restore<S: StateStorage + ?Sized>(storage: &S) -> AppState {
    let bytes = match storage.load() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            info!("No saved state found, starting empty");
            return AppState::default();
        }
        Err(e) => {
            warn!("Failed to read saved state, starting empty: {}", e);
            return AppState::default();
        }
    };

    match deserialize(&bytes) {
        Ok(state) => {
            info!(
                "Restored state: {} users, {} tables",
                state.users.len(),
                state.tables.len()
            );
            state
        }
        Err(e) => {
            warn!("Saved state is corrupt, starting empty: {}", e);
            AppState::default()
        }
    }
}

/// Write `state` to storage. Serialization and write failures are returned.
pub fn persist<S: StateStorage + ?Sized>(storage: &mut S, state: &AppState) -> Result<()> {
    let bytes = serialize(state)?;
    storage.save(&bytes)
}
