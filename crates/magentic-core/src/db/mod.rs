//! SQLite storage for plans, sessions, settings and learned-plan markers.
//!
//! [`Database`] implements every collaborator trait in [`crate::api`]. Each
//! submodule holds the queries for one table group.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod learned_queries;
pub mod plan_queries;
pub mod schema;
pub mod session_queries;
pub mod settings_queries;


const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        // Every workspace call opens its own connection; writers wait for
        // each other rather than failing with SQLITE_BUSY.
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
