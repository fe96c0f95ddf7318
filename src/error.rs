//! Error types for the table editor.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for table editor operations.
pub type Result<T> = std::result::Result<T, TableEditorError>;

/// Errors that can occur while editing or persisting application state.
///
/// The reducer itself never produces these; they come from storage backends
/// and from the caller-side validation performed before dispatch.
#[derive(Error, Debug)]
pub enum TableEditorError {
    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("Invalid action: {reason}")]
    InvalidAction { reason: String },

    // Storage Errors
    #[error("Storage quota exceeded: needed {needed_bytes} bytes, limit {limit_bytes} bytes")]
    StorageQuotaExceeded { needed_bytes: u64, limit_bytes: u64 },

    // Validation Errors
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("User with this name or email already exists: {name} <{email}>")]
    DuplicateUser { name: String, email: String },

    #[error("No active user selected")]
    NoActiveUser,

    #[error("Row text is {length} characters (maximum {max})")]
    RowTextTooLong { length: usize, max: usize },

    // Lookup Errors
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Table not found: {id}")]
    TableNotFound { id: String },

    #[error("Row not found: {row_id} in table {table_id}")]
    RowNotFound { table_id: String, row_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableEditorError {
    /// Get the error code for this error type.
    pub fn error_code(&self) -> &'static str {
        match self {
            TableEditorError::FileReadError { .. } => "FILE_READ_ERROR",
            TableEditorError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            TableEditorError::DirectoryCreateError { .. } => "DIRECTORY_CREATE_ERROR",
            TableEditorError::JsonSerializationError(_) => "SERIALIZATION_ERROR",
            TableEditorError::InvalidAction { .. } => "INVALID_ACTION",
            TableEditorError::StorageQuotaExceeded { .. } => "STORAGE_QUOTA_EXCEEDED",
            TableEditorError::MissingField { .. } => "MISSING_FIELD",
            TableEditorError::DuplicateUser { .. } => "DUPLICATE_USER",
            TableEditorError::NoActiveUser => "NO_ACTIVE_USER",
            TableEditorError::RowTextTooLong { .. } => "ROW_TEXT_TOO_LONG",
            TableEditorError::UserNotFound { .. } => "USER_NOT_FOUND",
            TableEditorError::TableNotFound { .. } => "TABLE_NOT_FOUND",
            TableEditorError::RowNotFound { .. } => "ROW_NOT_FOUND",
            TableEditorError::Io(_) => "IO_ERROR",
        }
    }

    /// Returns true if the user can fix the problem and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TableEditorError::StorageQuotaExceeded { .. }
                | TableEditorError::FileWriteError { .. }
                | TableEditorError::MissingField { .. }
                | TableEditorError::DuplicateUser { .. }
                | TableEditorError::NoActiveUser
                | TableEditorError::RowTextTooLong { .. }
                | TableEditorError::UserNotFound { .. }
                | TableEditorError::TableNotFound { .. }
                | TableEditorError::RowNotFound { .. }
        )
    }

    /// Returns true for errors raised by caller-side validation, before any
    /// action reached the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TableEditorError::MissingField { .. }
                | TableEditorError::DuplicateUser { .. }
                | TableEditorError::NoActiveUser
                | TableEditorError::RowTextTooLong { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            TableEditorError::StorageQuotaExceeded { .. } => {
                Some("Delete unused tables or rows, or raise the storage limit.")
            }
            TableEditorError::FileWriteError { .. } => {
                Some("Check that the data directory is writable.")
            }
            TableEditorError::NoActiveUser => {
                Some("Select an active user with 'table-editor set-active <id>'.")
            }
            TableEditorError::DuplicateUser { .. } => {
                Some("Choose a different name and email.")
            }
            TableEditorError::RowTextTooLong { .. } => Some("Shorten the row text."),
            _ => None,
        }
    }
}
