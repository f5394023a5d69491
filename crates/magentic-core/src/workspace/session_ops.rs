//! Session operations for the Workspace.

use jiff::Zoned;

use super::Workspace;
use crate::{
    error::Result,
    library,
    models::{Session, SessionSidebar},
};

impl Workspace {
    /// Creates a session stamped with the current time.
    pub async fn create_session(
        &self,
        name: &str,
        team_id: Option<i64>,
        user_id: &str,
    ) -> Result<Session> {
        let name = name.to_string();
        let user_id = user_id.to_string();
        self.with_db(move |db| library::create_session(db, &name, team_id, &user_id))
            .await
    }

    pub async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::list_sessions(&*db, &user_id))
            .await
    }

    /// The sidebar as of now, in the system time zone.
    pub async fn sidebar(&self, user_id: &str) -> Result<SessionSidebar> {
        self.sidebar_at(user_id, Zoned::now()).await
    }

    /// The sidebar as of `now`. Civil timestamps are read in `now`'s time
    /// zone.
    pub async fn sidebar_at(&self, user_id: &str, now: Zoned) -> Result<SessionSidebar> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::sidebar(&*db, &user_id, &now))
            .await
    }

    pub async fn rename_session(&self, id: i64, name: &str, user_id: &str) -> Result<Session> {
        let name = name.to_string();
        let user_id = user_id.to_string();
        self.with_db(move |db| library::rename_session(db, id, &name, &user_id))
            .await
    }

    pub async fn delete_session(&self, id: i64, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::delete_session(db, id, &user_id))
            .await
    }
}
