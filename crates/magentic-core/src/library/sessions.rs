//! Session operations.

use jiff::Zoned;
use log::info;

use crate::{
    api::SessionApi,
    error::{CoreError, Result},
    grouping::build_sidebar,
    models::{NewSession, Session, SessionSidebar},
};

fn require_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        Err(CoreError::invalid_input("name", "session name cannot be empty"))
    } else {
        Ok(name)
    }
}

pub fn create_session<A: SessionApi + ?Sized>(
    api: &mut A,
    name: &str,
    team_id: Option<i64>,
    user_id: &str,
) -> Result<Session> {
    let name = require_name(name)?;
    let session = api.create_session(
        &NewSession {
            name: name.to_string(),
            team_id,
        },
        user_id,
    )?;
    info!("Created session {} for {user_id}", session.id);
    Ok(session)
}

pub fn list_sessions<A: SessionApi + ?Sized>(api: &A, user_id: &str) -> Result<Vec<Session>> {
    api.list_sessions(user_id)
}

/// The user's sessions sorted newest first and grouped by recency relative to
/// `now`.
pub fn sidebar<A: SessionApi + ?Sized>(
    api: &A,
    user_id: &str,
    now: &Zoned,
) -> Result<SessionSidebar> {
    let sessions = api.list_sessions(user_id)?;
    Ok(build_sidebar(&sessions, now))
}

/// Renames one of the user's sessions. Sessions owned by someone else are
/// reported as not found.
pub fn rename_session<A: SessionApi + ?Sized>(
    api: &mut A,
    id: i64,
    name: &str,
    user_id: &str,
) -> Result<Session> {
    let name = require_name(name)?;
    if api.get_session(id, user_id)?.is_none() {
        return Err(CoreError::SessionNotFound { id });
    }
    api.rename_session(id, user_id, name)
}

pub fn delete_session<A: SessionApi + ?Sized>(api: &mut A, id: i64, user_id: &str) -> Result<()> {
    if api.get_session(id, user_id)?.is_none() {
        return Err(CoreError::SessionNotFound { id });
    }
    api.delete_session(id, user_id)?;
    info!("Deleted session {id}");
    Ok(())
}
