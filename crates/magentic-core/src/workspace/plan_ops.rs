//! Plan library operations for the Workspace.

use std::path::Path;

use serde_json::Value;

use super::Workspace;
use crate::{
    error::{CoreError, Result},
    import::ensure_json_file,
    library::{self, ImportFile},
    models::{Plan, Session},
};

impl Workspace {
    /// Lists the user's plans, normalized.
    pub async fn fetch_plans(&self, user_id: &str) -> Result<Vec<Plan>> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::fetch_plans(&*db, &user_id))
            .await
    }

    /// Lists the user's plans whose task contains `term`, ignoring case. An
    /// empty term lists everything.
    pub async fn search_plans(&self, user_id: &str, term: &str) -> Result<Vec<Plan>> {
        let user_id = user_id.to_string();
        let term = term.to_string();
        self.with_db(move |db| library::search_plans(&*db, &user_id, &term))
            .await
    }

    pub async fn get_plan(&self, id: i64, user_id: &str) -> Result<Plan> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::get_plan(&*db, id, &user_id))
            .await
    }

    /// Creates an empty plan named "New Plan".
    pub async fn create_blank_plan(&self, user_id: &str) -> Result<Plan> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::create_blank_plan(db, &user_id))
            .await
    }

    /// Imports a plan from already-loaded file contents.
    pub async fn import_plan(
        &self,
        file_name: &str,
        mime: Option<&str>,
        contents: &str,
        user_id: &str,
    ) -> Result<Plan> {
        let file_name = file_name.to_string();
        let mime = mime.map(String::from);
        let contents = contents.to_string();
        let user_id = user_id.to_string();

        self.with_db(move |db| {
            let file = ImportFile {
                name: &file_name,
                mime: mime.as_deref(),
                contents: &contents,
            };
            library::import_plan(db, file, &user_id)
        })
        .await
    }

    /// Reads a plan file from disk and imports it. The file type is judged by
    /// its name before the file is read.
    pub async fn import_plan_file(&self, path: &Path, user_id: &str) -> Result<Plan> {
        let path = path.to_path_buf();
        let user_id = user_id.to_string();

        self.with_db(move |db| {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            ensure_json_file(&file_name, None)?;

            let contents =
                std::fs::read_to_string(&path).map_err(|e| CoreError::FileSystem {
                    path: path.clone(),
                    source: e,
                })?;

            let file = ImportFile {
                name: &file_name,
                mime: None,
                contents: &contents,
            };
            library::import_plan(db, file, &user_id)
        })
        .await
    }

    /// Saves an edited plan record over plan `id`.
    pub async fn update_plan(&self, id: i64, raw: Value, user_id: &str) -> Result<Plan> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::update_plan(db, id, &raw, &user_id))
            .await
    }

    pub async fn delete_plan(&self, id: i64, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::delete_plan(db, id, &user_id))
            .await
    }

    /// Pretty JSON of the plan without its id.
    pub async fn export_plan(&self, id: i64, user_id: &str) -> Result<String> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::export_plan(&*db, id, &user_id))
            .await
    }

    /// Starts a session from a saved plan.
    pub async fn use_plan(&self, id: i64, user_id: &str) -> Result<(Session, Plan)> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::use_plan(db, id, &user_id))
            .await
    }

    /// Saves the plan of a conversation message into the library, once.
    pub async fn learn_plan(
        &self,
        session_id: i64,
        message_id: i64,
        raw: Value,
        user_id: &str,
    ) -> Result<Plan> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::learn_plan(db, session_id, message_id, &raw, &user_id))
            .await
    }

    pub async fn is_learned(&self, session_id: i64, message_id: i64) -> Result<bool> {
        self.with_db(move |db| library::is_learned(&*db, session_id, message_id))
            .await
    }
}
