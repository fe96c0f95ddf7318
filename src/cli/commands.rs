//! CLI Command Implementations
//!
//! Each command validates its input against the current snapshot, builds a
//! complete payload, and dispatches it. Validation failures return before
//! anything reaches the store.

use std::fmt::Write as _;

use chrono::Utc;
use log::info;

use crate::cli::{Commands, Notification};
use crate::error::{Result, TableEditorError};
use crate::model::{AppState, Table};
use crate::state::{Action, StateStorage, Store};
use crate::validation;

/// What a command produced: a status message or rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Notice(Notification),
    Text(String),
}

/// Run one command against the store.
pub fn run<S: StateStorage>(store: &mut Store<S>, command: Commands) -> Result<Output> {
    match command {
        Commands::Users => Ok(Output::Text(render_users(store.get_state()))),
        Commands::AddUser { name, email } => add_user(store, &name, &email).map(Output::Notice),
        Commands::EditUser { id, name, email } => {
            edit_user(store, &id, &name, &email).map(Output::Notice)
        }
        Commands::DeleteUser { id } => delete_user(store, &id).map(Output::Notice),
        Commands::SetActive { id } => set_active_user(store, id).map(Output::Notice),
        Commands::Tables => Ok(Output::Text(render_tables(store.get_state()))),
        Commands::AddTable { name } => add_table(store, &name).map(Output::Notice),
        Commands::RenameTable { id, name } => rename_table(store, &id, &name).map(Output::Notice),
        Commands::DeleteTable { id } => delete_table(store, &id).map(Output::Notice),
        Commands::Rows { table_id } => {
            let table = find_table(store.get_state(), &table_id)?;
            Ok(Output::Text(render_rows(table)))
        }
        Commands::AddRow { table_id, text } => add_row(store, &table_id, &text).map(Output::Notice),
        Commands::EditRow {
            table_id,
            row_id,
            text,
        } => edit_row(store, &table_id, &row_id, &text).map(Output::Notice),
        Commands::DeleteRow { table_id, row_id } => {
            delete_row(store, &table_id, &row_id).map(Output::Notice)
        }
        Commands::Stats => Ok(Output::Text(render_stats(store.get_state()))),
        Commands::PrintState => Ok(Output::Text(serde_json::to_string_pretty(
            store.get_state(),
        )?)),
        Commands::Dispatch { action } => dispatch_raw(store, &action).map(Output::Notice),
    }
}

fn find_table<'a>(state: &'a AppState, id: &str) -> Result<&'a Table> {
    state
        .find_table(id)
        .ok_or_else(|| TableEditorError::TableNotFound { id: id.to_string() })
}

fn require_user(state: &AppState, id: &str) -> Result<()> {
    state
        .find_user(id)
        .map(|_| ())
        .ok_or_else(|| TableEditorError::UserNotFound { id: id.to_string() })
}

/// Add a user after checking for duplicate name or email.
pub fn add_user<S: StateStorage>(store: &mut Store<S>, name: &str, email: &str) -> Result<Notification> {
    let user = validation::prepare_user(store.get_state(), name, email)?;
    info!("Adding user {} ({})", user.name, user.id);
    store.dispatch(Action::AddUser(user))?;
    Ok(Notification::success("User added successfully."))
}

pub fn edit_user<S: StateStorage>(
    store: &mut Store<S>,
    id: &str,
    name: &str,
    email: &str,
) -> Result<Notification> {
    let user = validation::prepare_user_edit(store.get_state(), id, name, email)?;
    store.dispatch(Action::UpdateUser(user))?;
    Ok(Notification::info("User updated."))
}

pub fn delete_user<S: StateStorage>(store: &mut Store<S>, id: &str) -> Result<Notification> {
    require_user(store.get_state(), id)?;
    info!("Deleting user {}", id);
    store.dispatch(Action::DeleteUser(id.to_string()))?;
    Ok(Notification::info("User deleted."))
}

/// Select an existing user, or clear the selection with `None`.
pub fn set_active_user<S: StateStorage>(
    store: &mut Store<S>,
    id: Option<String>,
) -> Result<Notification> {
    if let Some(id) = &id {
        require_user(store.get_state(), id)?;
    }
    store.dispatch(Action::SetActiveUser(id))?;
    Ok(Notification::info("Active user changed."))
}

pub fn add_table<S: StateStorage>(store: &mut Store<S>, name: &str) -> Result<Notification> {
    let table = validation::prepare_table(store.get_state(), name, Utc::now())?;
    info!("Adding table {} ({})", table.name, table.id);
    store.dispatch(Action::AddTable(table))?;
    Ok(Notification::success("Table added successfully"))
}

pub fn rename_table<S: StateStorage>(
    store: &mut Store<S>,
    id: &str,
    name: &str,
) -> Result<Notification> {
    let name = validation::prepare_table_name(name)?;
    find_table(store.get_state(), id)?;
    store.dispatch(Action::rename_table(id, name))?;
    Ok(Notification::success("Table renamed"))
}

pub fn delete_table<S: StateStorage>(store: &mut Store<S>, id: &str) -> Result<Notification> {
    let rows = find_table(store.get_state(), id)?.rows.len();
    info!("Deleting table {} with {} rows", id, rows);
    store.dispatch(Action::DeleteTable(id.to_string()))?;
    Ok(Notification::info("Table deleted"))
}

pub fn add_row<S: StateStorage>(
    store: &mut Store<S>,
    table_id: &str,
    text: &str,
) -> Result<Notification> {
    let state = store.get_state();
    find_table(state, table_id)?;
    let row = validation::prepare_row(state, text, Utc::now())?;
    store.dispatch(Action::add_row(table_id, row))?;
    Ok(Notification::success("Row added"))
}

pub fn edit_row<S: StateStorage>(
    store: &mut Store<S>,
    table_id: &str,
    row_id: &str,
    text: &str,
) -> Result<Notification> {
    let state = store.get_state();
    let row = find_table(state, table_id)?
        .find_row(row_id)
        .ok_or_else(|| TableEditorError::RowNotFound {
            table_id: table_id.to_string(),
            row_id: row_id.to_string(),
        })?;
    let edited = validation::prepare_row_edit(state, row, text, Utc::now())?;
    store.dispatch(Action::update_row(table_id, edited))?;
    Ok(Notification::success("Row updated"))
}

pub fn delete_row<S: StateStorage>(
    store: &mut Store<S>,
    table_id: &str,
    row_id: &str,
) -> Result<Notification> {
    store.dispatch(Action::delete_row(table_id, row_id))?;
    Ok(Notification::info("Row deleted"))
}

/// Dispatch a raw JSON action with no validation, as a direct dispatch would.
pub fn dispatch_raw<S: StateStorage>(store: &mut Store<S>, json: &str) -> Result<Notification> {
    let action = Action::parse(json)?;

    let notice = match &action {
        Action::Unknown(kind) => Notification::info(format!("Ignored unknown action {}", kind)),
        known => Notification::success(format!("Dispatched {}", known.kind())),
    };

    store.dispatch(action)?;
    Ok(notice)
}

pub fn render_users(state: &AppState) -> String {
    if state.users.is_empty() {
        return "No users yet.".to_string();
    }

    let active = state.active_user_id.as_deref();
    let mut out = String::new();
    for user in &state.users {
        let marker = if Some(user.id.as_str()) == active {
            ">>> "
        } else {
            "    "
        };
        let _ = writeln!(out, "{}{}  {} ({})", marker, user.id, user.name, user.email);
    }
    out
}

pub fn render_tables(state: &AppState) -> String {
    if state.tables.is_empty() {
        return "No tables yet.".to_string();
    }

    let mut out = String::new();
    for table in &state.tables {
        let _ = writeln!(out, "{}  {}", table.id, table.name);
        let _ = writeln!(
            out,
            "    Created by: {} on {}",
            table.created_by,
            table.created_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out, "    Rows: {}", table.rows.len());
    }
    out
}

pub fn render_rows(table: &Table) -> String {
    if table.rows.is_empty() {
        return format!("No rows in {}.", table.name);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", table.name);
    let _ = writeln!(out, "{:-<60}", "");
    for row in &table.rows {
        let _ = writeln!(out, "{}  {}", row.id, row.text);
        let _ = write!(
            out,
            "    created {} by {}",
            row.created_at.format("%Y-%m-%d %H:%M:%S"),
            row.created_by
        );
        if let (Some(by), Some(at)) = (&row.modified_by, &row.modified_at) {
            let _ = write!(out, ", modified {} by {}", at.format("%Y-%m-%d %H:%M:%S"), by);
        }
        out.push('\n');
    }
    out
}

pub fn render_stats(state: &AppState) -> String {
    let stats = state.stats();
    format!(
        "Users: {}\nTables: {}\nRows: {}\nActive User: {}\n",
        stats.users,
        stats.tables,
        stats.rows,
        stats.active_user_id.as_deref().unwrap_or("None selected")
    )
}
