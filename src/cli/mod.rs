//! CLI Module
//!
//! Command-line front end for the table editor. It plays the part of the
//! view layer: reads state, validates input, dispatches actions, and
//! reports the outcome as a [`Notification`].

pub mod commands;

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::TableEditorError;

/// Table Editor - manage users, tables and rows
#[derive(Parser, Debug)]
#[command(name = "table-editor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the saved state (overrides TABLE_EDITOR_DATA_DIR)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List users
    #[command(name = "users")]
    Users,

    /// Add a user
    #[command(name = "add-user")]
    AddUser {
        /// Display name (must be unique)
        #[arg(short, long)]
        name: String,

        /// Email address (must be unique)
        #[arg(short, long)]
        email: String,
    },

    /// Replace a user's name and email
    #[command(name = "edit-user")]
    EditUser {
        /// User id
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,
    },

    /// Delete a user
    #[command(name = "delete-user")]
    DeleteUser {
        /// User id
        id: String,
    },

    /// Select the active user, or clear the selection when no id is given
    #[command(name = "set-active")]
    SetActive {
        /// User id
        id: Option<String>,
    },

    /// List tables
    #[command(name = "tables")]
    Tables,

    /// Add a table owned by the active user
    #[command(name = "add-table")]
    AddTable {
        /// Table name
        name: String,
    },

    /// Rename a table
    #[command(name = "rename-table")]
    RenameTable {
        /// Table id
        id: String,

        /// New name
        name: String,
    },

    /// Delete a table and all of its rows
    #[command(name = "delete-table")]
    DeleteTable {
        /// Table id
        id: String,
    },

    /// List the rows of a table
    #[command(name = "rows")]
    Rows {
        /// Table id
        table_id: String,
    },

    /// Add a row authored by the active user
    #[command(name = "add-row")]
    AddRow {
        /// Table id
        table_id: String,

        /// Row text (max 100 characters)
        text: String,
    },

    /// Replace the text of a row
    #[command(name = "edit-row")]
    EditRow {
        /// Table id
        table_id: String,

        /// Row id
        row_id: String,

        /// New text (max 100 characters)
        text: String,
    },

    /// Delete a row
    #[command(name = "delete-row")]
    DeleteRow {
        /// Table id
        table_id: String,

        /// Row id
        row_id: String,
    },

    /// Show user, table and row counts
    #[command(name = "stats")]
    Stats,

    /// Print the full state as JSON
    #[command(name = "print-state")]
    PrintState,

    /// Dispatch a raw JSON action, bypassing validation
    #[command(name = "dispatch")]
    Dispatch {
        /// Action as {"type": ..., "payload": ...}
        action: String,
    },
}

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

/// Short message describing the outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    /// Notification for a failed command. Missing input is a warning;
    /// everything else is an error.
    pub fn from_error(err: &TableEditorError) -> Self {
        let level = match err {
            TableEditorError::MissingField { .. } => NotificationLevel::Warning,
            _ => NotificationLevel::Error,
        };
        Self {
            level,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
