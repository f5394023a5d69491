//! Async facade over the plan library, sessions and settings.
//!
//! [`Workspace`] owns nothing but the database path. Every call opens a fresh
//! SQLite connection on a blocking thread and runs one of the synchronous
//! operations from [`crate::library`] against it.
//!
//! ```rust
//! use magentic_core::WorkspaceBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = WorkspaceBuilder::new()
//!     .with_database_path(Some("magentic.db"))
//!     .build()
//!     .await?;
//!
//! let plan = workspace.create_blank_plan("local").await?;
//! let session = workspace.use_plan(plan.id.unwrap_or_default(), "local").await?;
//! println!("{}", session.0);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{CoreError, Result},
};

pub mod builder;
pub mod plan_ops;
pub mod session_ops;
pub mod settings_ops;


pub use builder::WorkspaceBuilder;

/// Entry point for applications working with a Magentic database.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub(crate) db_path: PathBuf,
}

impl Workspace {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` on a blocking thread with a freshly opened database.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| CoreError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
