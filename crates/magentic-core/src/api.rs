//! Collaborator interfaces the library operations are written against.
//!
//! [`crate::db::Database`] implements all of them on SQLite. The operations in
//! [`crate::library`] only see these traits, so any backend (a REST client, an
//! in-memory fake) can stand in.

use serde_json::Value;

use crate::{
    error::Result,
    models::{NewSession, Plan, Session, Settings},
};

/// Storage of saved plans.
pub trait PlanApi {
    /// Plans owned by `user_id`, as raw records. Callers normalize them.
    fn list_plans(&self, user_id: &str) -> Result<Vec<Value>>;

    /// A single plan as a raw record, or `None` if no plan `id` is owned by
    /// `user_id`.
    fn get_plan(&self, id: i64, user_id: &str) -> Result<Option<Value>>;

    /// Stores a new plan and returns it with its assigned id. Any id on the
    /// input is ignored.
    fn create_plan(&mut self, plan: &Plan, user_id: &str) -> Result<Plan>;

    /// Replaces the task and steps of an existing plan owned by `user_id`.
    fn update_plan(&mut self, plan: &Plan, user_id: &str) -> Result<Plan>;

    fn delete_plan(&mut self, id: i64, user_id: &str) -> Result<()>;
}

/// Storage of sessions.
pub trait SessionApi {
    /// Stores a new session and returns it with its assigned id and creation
    /// time.
    fn create_session(&mut self, session: &NewSession, user_id: &str) -> Result<Session>;

    fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>>;

    /// The session `id`, or `None` if it is not owned by `user_id`.
    fn get_session(&self, id: i64, user_id: &str) -> Result<Option<Session>>;

    fn rename_session(&mut self, id: i64, user_id: &str, name: &str) -> Result<Session>;

    fn delete_session(&mut self, id: i64, user_id: &str) -> Result<()>;
}

/// Per-user settings storage.
pub trait SettingsApi {
    /// Stored settings, or `None` if the user never saved any.
    fn get_settings(&self, user_id: &str) -> Result<Option<Settings>>;

    fn update_settings(&mut self, user_id: &str, settings: &Settings) -> Result<()>;
}

/// Idempotency record of plans learned from a conversation, keyed by
/// `(session_id, message_id)`.
pub trait LearnedPlanStore {
    fn is_learned(&self, session_id: i64, message_id: i64) -> Result<bool>;

    /// Stores `plan` for `user_id` and records the marker for
    /// `(session_id, message_id)` as a single unit.
    ///
    /// Fails with [`crate::CoreError::AlreadyLearned`] if the marker already
    /// exists, in which case nothing is stored.
    fn store_learned_plan(
        &mut self,
        session_id: i64,
        message_id: i64,
        plan: &Plan,
        user_id: &str,
    ) -> Result<Plan>;
}

/// Key under which a learned-plan marker is recorded.
pub fn learned_key(session_id: i64, message_id: i64) -> String {
    format!("{session_id}-{message_id}")
}
