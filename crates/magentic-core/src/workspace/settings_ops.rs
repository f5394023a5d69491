//! Settings operations for the Workspace.

use super::Workspace;
use crate::{error::Result, library, model_config::ModelPreset, models::Settings};

impl Workspace {
    /// Stored settings, or the defaults.
    pub async fn settings(&self, user_id: &str) -> Result<Settings> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::load_settings(&*db, &user_id))
            .await
    }

    pub async fn save_settings(&self, user_id: &str, settings: Settings) -> Result<()> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::save_settings(db, &user_id, &settings))
            .await
    }

    /// Applies `change` to the stored settings and saves the result.
    ///
    /// The model configuration is validated before anything is written.
    pub async fn update_settings<F>(&self, user_id: &str, change: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings) + Send + 'static,
    {
        let user_id = user_id.to_string();
        self.with_db(move |db| {
            let mut settings = library::load_settings(&*db, &user_id)?;
            change(&mut settings);
            library::save_settings(db, &user_id, &settings)?;
            Ok(settings)
        })
        .await
    }

    pub async fn reset_settings(&self, user_id: &str) -> Result<Settings> {
        let user_id = user_id.to_string();
        self.with_db(move |db| library::reset_settings(db, &user_id))
            .await
    }

    /// Replaces the model configuration with YAML text.
    pub async fn import_model_config(&self, user_id: &str, text: &str) -> Result<Settings> {
        let user_id = user_id.to_string();
        let text = text.to_string();
        self.with_db(move |db| library::import_model_config(db, &user_id, &text))
            .await
    }

    pub async fn apply_model_preset(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<(ModelPreset, Settings)> {
        let user_id = user_id.to_string();
        let name = name.to_string();
        self.with_db(move |db| library::apply_model_preset(db, &user_id, &name))
            .await
    }

    pub async fn allow_website(&self, user_id: &str, site: &str) -> Result<Settings> {
        let user_id = user_id.to_string();
        let site = site.to_string();
        self.with_db(move |db| library::allow_website(db, &user_id, &site))
            .await
    }

    pub async fn remove_website(&self, user_id: &str, site: &str) -> Result<Settings> {
        let user_id = user_id.to_string();
        let site = site.to_string();
        self.with_db(move |db| library::remove_website(db, &user_id, &site))
            .await
    }
}
