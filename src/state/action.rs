//! Actions
//!
//! Typed descriptions of state transitions. On the wire an action is
//! `{"type": KIND, "payload": ...}` with the kind in SCREAMING_SNAKE_CASE.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TableEditorError};
use crate::model::{AppState, Row, Table, User};

/// Every action kind the reducer understands, in wire form.
pub const ACTION_KINDS: [&str; 11] = [
    "SET_ACTIVE_USER",
    "ADD_USER",
    "UPDATE_USER",
    "DELETE_USER",
    "ADD_TABLE",
    "UPDATE_TABLE_NAME",
    "DELETE_TABLE",
    "ADD_ROW",
    "UPDATE_ROW",
    "DELETE_ROW",
    "LOAD_FROM_STORAGE",
];

/// A tagged payload describing an intended state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Select a user, or clear the selection with `None`.
    SetActiveUser(Option<String>),

    AddUser(User),

    /// Full replacement of the user with the same id.
    UpdateUser(User),

    /// Remove a user by id.
    DeleteUser(String),

    AddTable(Table),

    UpdateTableName(TableRename),

    /// Remove a table, and with it all of its rows.
    DeleteTable(String),

    AddRow(RowChange),

    /// Full replacement of the row with the same id inside a table.
    UpdateRow(RowChange),

    DeleteRow(RowRef),

    /// Replace the entire state with a restored snapshot.
    LoadFromStorage(AppState),

    /// Any kind not listed in [`ACTION_KINDS`]. Reduces to the input state.
    #[serde(skip)]
    Unknown(String),
}

/// Payload of `UPDATE_TABLE_NAME`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRename {
    pub id: String,
    pub name: String,
}

/// Payload of `ADD_ROW` and `UPDATE_ROW`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowChange {
    pub table_id: String,
    pub row: Row,
}

/// Payload of `DELETE_ROW`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRef {
    pub table_id: String,
    pub row_id: String,
}

impl Action {
    /// Parse an action from its wire form.
    ///
    /// Unrecognized kinds become [`Action::Unknown`] rather than an error.
    /// A recognized kind with a malformed payload is an error.
    pub fn from_json(value: Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| TableEditorError::InvalidAction {
                reason: "missing string field 'type'".to_string(),
            })?;

        if !ACTION_KINDS.contains(&kind) {
            return Ok(Action::Unknown(kind.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Parse an action from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(value)
    }

    /// The wire name of this action's kind.
    pub fn kind(&self) -> &str {
        match self {
            Action::SetActiveUser(_) => "SET_ACTIVE_USER",
            Action::AddUser(_) => "ADD_USER",
            Action::UpdateUser(_) => "UPDATE_USER",
            Action::DeleteUser(_) => "DELETE_USER",
            Action::AddTable(_) => "ADD_TABLE",
            Action::UpdateTableName(_) => "UPDATE_TABLE_NAME",
            Action::DeleteTable(_) => "DELETE_TABLE",
            Action::AddRow(_) => "ADD_ROW",
            Action::UpdateRow(_) => "UPDATE_ROW",
            Action::DeleteRow(_) => "DELETE_ROW",
            Action::LoadFromStorage(_) => "LOAD_FROM_STORAGE",
            Action::Unknown(kind) => kind.as_str(),
        }
    }

    pub fn rename_table(id: impl Into<String>, name: impl Into<String>) -> Self {
        Action::UpdateTableName(TableRename {
            id: id.into(),
            name: name.into(),
        })
    }

    pub fn add_row(table_id: impl Into<String>, row: Row) -> Self {
        Action::AddRow(RowChange {
            table_id: table_id.into(),
            row,
        })
    }

    pub fn update_row(table_id: impl Into<String>, row: Row) -> Self {
        Action::UpdateRow(RowChange {
            table_id: table_id.into(),
            row,
        })
    }

    pub fn delete_row(table_id: impl Into<String>, row_id: impl Into<String>) -> Self {
        Action::DeleteRow(RowRef {
            table_id: table_id.into(),
            row_id: row_id.into(),
        })
    }
}
