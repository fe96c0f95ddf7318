//! Reducer
//!
//! Pure mapping from (current state, action) to next state. The input is
//! only borrowed, so callers always keep an untouched snapshot.
//!
//! The reducer is deliberately permissive: payloads arrive fully formed and
//! are applied as-is. Duplicate ids or names are accepted, and unmatched ids
//! make the transform a no-op.

use crate::model::{AppState, Table};
use crate::state::action::{Action, RowChange, RowRef, TableRename};

/// Compute the state that follows `action`.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::SetActiveUser(user_id) => AppState {
            active_user_id: user_id.clone(),
            ..state.clone()
        },

        Action::AddUser(user) => {
            let mut next = state.clone();
            next.users.push(user.clone());
            next
        }

        Action::UpdateUser(user) => AppState {
            users: state
                .users
                .iter()
                .map(|u| if u.id == user.id { user.clone() } else { u.clone() })
                .collect(),
            ..state.clone()
        },

        Action::DeleteUser(user_id) => AppState {
            users: state
                .users
                .iter()
                .filter(|u| &u.id != user_id)
                .cloned()
                .collect(),
            tables: state.tables.clone(),
            active_user_id: state
                .active_user_id
                .clone()
                .filter(|active| active != user_id),
        },

        Action::AddTable(table) => {
            let mut next = state.clone();
            next.tables.push(table.clone());
            next
        }

        Action::UpdateTableName(TableRename { id, name }) => map_table(state, id, |t| Table {
            name: name.clone(),
            ..t.clone()
        }),

        Action::DeleteTable(table_id) => AppState {
            tables: state
                .tables
                .iter()
                .filter(|t| &t.id != table_id)
                .cloned()
                .collect(),
            ..state.clone()
        },

        Action::AddRow(RowChange { table_id, row }) => map_table(state, table_id, |t| {
            let mut table = t.clone();
            table.rows.push(row.clone());
            table
        }),

        Action::UpdateRow(RowChange { table_id, row }) => map_table(state, table_id, |t| Table {
            rows: t
                .rows
                .iter()
                .map(|r| if r.id == row.id { row.clone() } else { r.clone() })
                .collect(),
            ..t.clone()
        }),

        Action::DeleteRow(RowRef { table_id, row_id }) => map_table(state, table_id, |t| Table {
            rows: t.rows.iter().filter(|r| &r.id != row_id).cloned().collect(),
            ..t.clone()
        }),

        Action::LoadFromStorage(snapshot) => snapshot.clone(),

        Action::Unknown(_) => state.clone(),
    }
}

/// Rebuild `tables`, applying `f` to every table whose id matches.
fn map_table<F>(state: &AppState, table_id: &str, f: F) -> AppState
where
    F: Fn(&Table) -> Table,
{
    AppState {
        tables: state
            .tables
            .iter()
            .map(|t| if t.id == table_id { f(t) } else { t.clone() })
            .collect(),
        ..state.clone()
    }
}
