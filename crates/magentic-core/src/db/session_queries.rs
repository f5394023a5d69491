//! Session queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use crate::{
    api::SessionApi,
    error::{CoreError, DatabaseResultExt, Result},
    models::{NewSession, Session},
};

const INSERT_SESSION_SQL: &str =
    "INSERT INTO sessions (name, user_id, team_id, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_SESSION_SQL: &str =
    "SELECT id, name, created_at, team_id FROM sessions WHERE id = ?1 AND user_id = ?2";
const LIST_SESSIONS_SQL: &str =
    "SELECT id, name, created_at, team_id FROM sessions WHERE user_id = ?1 ORDER BY id";
const RENAME_SESSION_SQL: &str = "UPDATE sessions SET name = ?1 WHERE id = ?2 AND user_id = ?3";
const DELETE_SESSION_SQL: &str = "DELETE FROM sessions WHERE id = ?1 AND user_id = ?2";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
        team_id: row.get(3)?,
    })
}

impl super::Database {
    /// Stores a session with an explicit creation time. Used when sessions
    /// are imported from elsewhere with their original timestamps.
    pub fn insert_session_at(
        &mut self,
        session: &NewSession,
        user_id: &str,
        created_at: Option<&str>,
    ) -> Result<Session> {
        self.connection
            .execute(
                INSERT_SESSION_SQL,
                params![session.name, user_id, session.team_id, created_at],
            )
            .db_context("Failed to insert session")?;

        Ok(Session {
            id: self.connection.last_insert_rowid(),
            name: session.name.clone(),
            created_at: created_at.map(String::from),
            team_id: session.team_id,
        })
    }
}

impl SessionApi for super::Database {
    fn create_session(&mut self, session: &NewSession, user_id: &str) -> Result<Session> {
        let now = Timestamp::now().to_string();
        self.insert_session_at(session, user_id, Some(&now))
    }

    fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SESSIONS_SQL)
            .db_context("Failed to prepare query")?;

        let sessions = stmt
            .query_map(params![user_id], session_from_row)
            .db_context("Failed to query sessions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch sessions")?;

        Ok(sessions)
    }

    fn get_session(&self, id: i64, user_id: &str) -> Result<Option<Session>> {
        self.connection
            .query_row(SELECT_SESSION_SQL, params![id, user_id], session_from_row)
            .optional()
            .db_context("Failed to query session")
    }

    fn rename_session(&mut self, id: i64, user_id: &str, name: &str) -> Result<Session> {
        let rows = self
            .connection
            .execute(RENAME_SESSION_SQL, params![name, id, user_id])
            .db_context("Failed to rename session")?;
        if rows == 0 {
            return Err(CoreError::SessionNotFound { id });
        }
        self.get_session(id, user_id)?
            .ok_or(CoreError::SessionNotFound { id })
    }

    fn delete_session(&mut self, id: i64, user_id: &str) -> Result<()> {
        let rows = self
            .connection
            .execute(DELETE_SESSION_SQL, params![id, user_id])
            .db_context("Failed to delete session")?;
        if rows == 0 {
            return Err(CoreError::SessionNotFound { id });
        }
        Ok(())
    }
}
