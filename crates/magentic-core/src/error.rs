//! Error types for the plan library.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons an imported plan document is rejected.
///
/// The messages are shown to the user as-is.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document is not valid JSON
    #[error("Invalid JSON file format. Please check your file and try again.")]
    MalformedDocument {
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed but is not a JSON object
    #[error("Invalid plan format. The file does not contain a valid plan structure.")]
    InvalidShape,
    /// The selected file is not a JSON file
    #[error("Please upload a JSON file (got '{name}')")]
    UnsupportedFileType { name: String },
}

/// Comprehensive error type for all library operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: i64 },
    /// Session not found for the given ID
    #[error("Session with ID {id} not found")]
    SessionNotFound { id: i64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Rejected plan import
    #[error(transparent)]
    Import(#[from] ImportError),
    /// Model configuration text is missing required client sections
    #[error("YAML must include all required model clients: {}", missing.join(", "))]
    ModelConfig { missing: Vec<String> },
    /// A plan was already saved from this conversation message
    #[error("A plan was already learned from session {session_id}, message {message_id}")]
    AlreadyLearned { session_id: i64, message_id: i64 },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CoreError {
        CoreError::Database {
            message: self.message,
            source,
        }
    }
}

impl CoreError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Shorthand for an [`CoreError::InvalidInput`] on `field`.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CoreError::database(message).with_source(e))
    }
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_error_lists_missing_clients() {
        let err = CoreError::ModelConfig {
            missing: vec!["coder_client".into(), "file_surfer_client".into()],
        };
        assert_eq!(
            err.to_string(),
            "YAML must include all required model clients: coder_client, file_surfer_client"
        );
    }

    #[test]
    fn test_import_error_is_transparent() {
        let err: CoreError = ImportError::InvalidShape.into();
        assert_eq!(err.to_string(), ImportError::InvalidShape.to_string());
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load").unwrap_err();
        assert!(
            matches!(err, CoreError::Database { ref message, .. } if message == "Failed to load")
        );
    }
}
