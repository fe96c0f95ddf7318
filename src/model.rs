//! Domain Model
//!
//! Users, tables and rows, plus the application state tree that holds them.
//! Field names serialize in camelCase, which is also the persisted layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a new collection key.
///
/// Uniqueness is probabilistic (UUID v4); collisions are not checked.
pub fn create_id() -> String {
    Uuid::new_v4().to_string()
}

/// A person who can own tables and author rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier within `AppState::users`.
    pub id: String,

    /// Display name, also recorded as the author of tables and rows.
    pub name: String,

    /// Contact email.
    pub email: String,
}

impl User {
    /// Create a user with a freshly generated id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: create_id(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A single line of text inside a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Unique identifier within the owning table.
    pub id: String,

    /// Row content. At most 100 characters when created through validation.
    pub text: String,

    /// Name of the user who created the row.
    pub created_by: String,

    /// When the row was created.
    pub created_at: DateTime<Utc>,

    /// Name of the user who last edited the row.
    pub modified_by: Option<String>,

    /// When the row was last edited.
    pub modified_at: Option<DateTime<Utc>>,
}

impl Row {
    /// Create an unedited row authored by `created_by` at `created_at`.
    pub fn new(
        text: impl Into<String>,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: create_id(),
            text: text.into(),
            created_by: created_by.into(),
            created_at,
            modified_by: None,
            modified_at: None,
        }
    }

    /// Whether the row has been edited since creation.
    pub fn is_modified(&self) -> bool {
        self.modified_at.is_some()
    }
}

/// A named, ordered collection of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Unique identifier within `AppState::tables`.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Rows in insertion order.
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Name of the user who created the table.
    pub created_by: String,

    /// When the table was created.
    pub created_at: DateTime<Utc>,
}

impl Table {
    /// Create an empty table with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        created_by: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: create_id(),
            name: name.into(),
            rows: Vec::new(),
            created_by: created_by.into(),
            created_at,
        }
    }

    pub fn find_row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }
}

/// The whole application state tree.
///
/// `Default` is the empty initial state used when nothing has been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Users in insertion order.
    #[serde(default)]
    pub users: Vec<User>,

    /// Tables in insertion order.
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Currently selected user, attributed as author of new tables and rows.
    #[serde(default)]
    pub active_user_id: Option<String>,
}

/// Summary counts shown alongside the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub users: usize,
    pub tables: usize,
    pub rows: usize,
    pub active_user_id: Option<String>,
}

impl AppState {
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// The user referenced by `active_user_id`, if it still exists.
    pub fn active_user(&self) -> Option<&User> {
        self.active_user_id
            .as_deref()
            .and_then(|id| self.find_user(id))
    }

    pub fn stats(&self) -> Stats {
        Stats {
            users: self.users.len(),
            tables: self.tables.len(),
            rows: self.tables.iter().map(|t| t.rows.len()).sum(),
            active_user_id: self.active_user_id.clone(),
        }
    }
}
