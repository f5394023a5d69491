//! Builder for creating and configuring Workspace instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Workspace;
use crate::{
    db::Database,
    error::{CoreError, Result},
};

/// Builder for creating and configuring Workspace instances.
#[derive(Debug, Clone)]
pub struct WorkspaceBuilder {
    database_path: Option<PathBuf>,
}

impl WorkspaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/magentic/magentic.db` or
    /// `~/.local/share/magentic/magentic.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the workspace, creating the database file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::FileSystem` if the parent directory cannot be
    /// created, and `CoreError::Database` if the schema cannot be applied.
    pub async fn build(self) -> Result<Workspace> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CoreError>(())
        })
        .await
        .map_err(|e| CoreError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!("Opened workspace at {}", db_path.display());
        Ok(Workspace::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("magentic")
            .place_data_file("magentic.db")
            .map_err(|e| CoreError::XdgDirectory(e.to_string()))
    }
}

impl Default for WorkspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
