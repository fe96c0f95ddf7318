//! Caller-side Validation
//!
//! Checks performed before an action is dispatched, and construction of the
//! fully formed payloads that go with it. The reducer never calls into this
//! module; a direct dispatch bypasses every rule here.

use chrono::{DateTime, Utc};

use crate::error::{Result, TableEditorError};
use crate::model::{AppState, Row, Table, User};

/// Maximum row text length, in characters.
pub const MAX_ROW_TEXT_CHARS: usize = 100;

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(TableEditorError::MissingField { field });
    }
    Ok(value)
}

fn require_trimmed<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    require(value.trim(), field)
}

fn check_row_length(text: &str) -> Result<()> {
    let length = text.chars().count();
    if length > MAX_ROW_TEXT_CHARS {
        return Err(TableEditorError::RowTextTooLong {
            length,
            max: MAX_ROW_TEXT_CHARS,
        });
    }
    Ok(())
}

/// The active user, which must exist before tables or rows can be created.
pub fn require_active_user(state: &AppState) -> Result<&User> {
    state.active_user().ok_or(TableEditorError::NoActiveUser)
}

/// Build a new user, rejecting empty fields and any existing user that
/// shares the name or the email.
pub fn prepare_user(state: &AppState, name: &str, email: &str) -> Result<User> {
    let name = require(name, "Name")?;
    let email = require(email, "Email")?;

    let duplicate = state
        .users
        .iter()
        .any(|u| u.name == name || u.email == email);
    if duplicate {
        return Err(TableEditorError::DuplicateUser {
            name: name.to_string(),
            email: email.to_string(),
        });
    }

    Ok(User::new(name, email))
}

/// Build the replacement for an existing user. Duplicates are not checked
/// on edit.
pub fn prepare_user_edit(state: &AppState, id: &str, name: &str, email: &str) -> Result<User> {
    let name = require(name, "Name")?;
    let email = require(email, "Email")?;

    let existing = state
        .find_user(id)
        .ok_or_else(|| TableEditorError::UserNotFound { id: id.to_string() })?;

    Ok(User {
        id: existing.id.clone(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Build a new empty table owned by the active user.
pub fn prepare_table(state: &AppState, name: &str, now: DateTime<Utc>) -> Result<Table> {
    let name = require_trimmed(name, "Table name")?;
    let owner = require_active_user(state)?;
    Ok(Table::new(name, owner.name.as_str(), now))
}

/// Trimmed, non-empty table name for a rename.
pub fn prepare_table_name(name: &str) -> Result<String> {
    require_trimmed(name, "Table name").map(str::to_string)
}

/// Build a new row authored by the active user.
///
/// The length limit applies to the text as typed, before trimming.
pub fn prepare_row(state: &AppState, text: &str, now: DateTime<Utc>) -> Result<Row> {
    let author = require_active_user(state)?;
    let trimmed = require_trimmed(text, "Text")?;
    check_row_length(text)?;
    Ok(Row::new(trimmed, author.name.as_str(), now))
}

/// Build the edited version of `row`.
///
/// The editor is recorded as the active user when one is selected;
/// otherwise the previous `modified_by` is kept.
pub fn prepare_row_edit(
    state: &AppState,
    row: &Row,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Row> {
    let trimmed = require_trimmed(text, "Text")?;
    check_row_length(text)?;

    let modified_by = match state.active_user() {
        Some(user) => Some(user.name.clone()),
        None => row.modified_by.clone(),
    };

    Ok(Row {
        text: trimmed.to_string(),
        modified_by,
        modified_at: Some(now),
        ..row.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_alice(active: bool) -> AppState {
        let alice = User {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
        };
        AppState {
            active_user_id: active.then(|| alice.id.clone()),
            users: vec![alice],
            tables: vec![],
        }
    }

    #[test]
    fn test_prepare_user_requires_fields() {
        let state = AppState::default();
        let err = prepare_user(&state, "", "a@x.com").unwrap_err();
        assert!(matches!(err, TableEditorError::MissingField { field: "Name" }));

        let err = prepare_user(&state, "Alice", "").unwrap_err();
        assert!(matches!(err, TableEditorError::MissingField { field: "Email" }));
    }

    #[test]
    fn test_prepare_user_rejects_duplicate_name_or_email() {
        let state = state_with_alice(false);
        assert!(matches!(
            prepare_user(&state, "Alice", "other@x.com"),
            Err(TableEditorError::DuplicateUser { .. })
        ));
        assert!(matches!(
            prepare_user(&state, "Bob", "a@x.com"),
            Err(TableEditorError::DuplicateUser { .. })
        ));

        let bob = prepare_user(&state, "Bob", "b@x.com").unwrap();
        assert_eq!(bob.name, "Bob");
        assert_ne!(bob.id, "u1");
    }

    #[test]
    fn test_prepare_user_edit_keeps_id_and_allows_duplicates() {
        let mut state = state_with_alice(false);
        state.users.push(User {
            id: "u2".to_string(),
            name: "Bob".to_string(),
            email: "b@x.com".to_string(),
        });

        let edited = prepare_user_edit(&state, "u2", "Alice", "a@x.com").unwrap();
        assert_eq!(edited.id, "u2");
        assert_eq!(edited.name, "Alice");

        assert!(matches!(
            prepare_user_edit(&state, "missing", "X", "x@x.com"),
            Err(TableEditorError::UserNotFound { .. })
        ));
    }

    #[test]
    fn test_prepare_table_needs_active_user() {
        let now = Utc::now();
        let err = prepare_table(&state_with_alice(false), "Inventory", now).unwrap_err();
        assert!(matches!(err, TableEditorError::NoActiveUser));

        let table = prepare_table(&state_with_alice(true), "  Inventory  ", now).unwrap();
        assert_eq!(table.name, "Inventory");
        assert_eq!(table.created_by, "Alice");
        assert_eq!(table.created_at, now);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_prepare_table_name_rejects_blank() {
        assert!(prepare_table_name("   ").is_err());
        assert_eq!(prepare_table_name(" Stock ").unwrap(), "Stock");
    }

    #[test]
    fn test_prepare_row_checks_in_order() {
        let now = Utc::now();
        // No active user wins over empty text.
        assert!(matches!(
            prepare_row(&state_with_alice(false), "", now),
            Err(TableEditorError::NoActiveUser)
        ));

        let state = state_with_alice(true);
        assert!(matches!(
            prepare_row(&state, "   ", now),
            Err(TableEditorError::MissingField { field: "Text" })
        ));

        let too_long = "x".repeat(MAX_ROW_TEXT_CHARS + 1);
        assert!(matches!(
            prepare_row(&state, &too_long, now),
            Err(TableEditorError::RowTextTooLong { length: 101, max: 100 })
        ));

        let row = prepare_row(&state, " Widget ", now).unwrap();
        assert_eq!(row.text, "Widget");
        assert_eq!(row.created_by, "Alice");
        assert!(row.modified_by.is_none());
        assert!(row.modified_at.is_none());
    }

    #[test]
    fn test_row_limit_counts_characters() {
        let state = state_with_alice(true);
        let text = "é".repeat(MAX_ROW_TEXT_CHARS);
        assert!(prepare_row(&state, &text, Utc::now()).is_ok());
    }

    #[test]
    fn test_prepare_row_edit_records_editor() {
        let created = Utc::now();
        let row = Row::new("Widget", "Alice", created);
        let later = created + chrono::Duration::minutes(5);

        let edited = prepare_row_edit(&state_with_alice(true), &row, "Sprocket", later).unwrap();
        assert_eq!(edited.id, row.id);
        assert_eq!(edited.text, "Sprocket");
        assert_eq!(edited.created_by, "Alice");
        assert_eq!(edited.modified_by.as_deref(), Some("Alice"));
        assert_eq!(edited.modified_at, Some(later));
    }

    #[test]
    fn test_prepare_row_edit_without_active_user_keeps_previous_editor() {
        let mut row = Row::new("Widget", "Alice", Utc::now());
        row.modified_by = Some("Bob".to_string());

        let edited = prepare_row_edit(&state_with_alice(false), &row, "Sprocket", Utc::now()).unwrap();
        assert_eq!(edited.modified_by.as_deref(), Some("Bob"));
        assert!(edited.modified_at.is_some());
    }
}
