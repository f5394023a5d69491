//! Per-user settings, stored as one JSON document per user.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    api::SettingsApi,
    error::{DatabaseResultExt, Result},
    models::Settings,
};

const SELECT_SETTINGS_SQL: &str = "SELECT config FROM settings WHERE user_id = ?1";
const UPSERT_SETTINGS_SQL: &str = "INSERT INTO settings (user_id, config, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(user_id) DO UPDATE SET config = excluded.config, updated_at = excluded.updated_at";

impl SettingsApi for super::Database {
    fn get_settings(&self, user_id: &str) -> Result<Option<Settings>> {
        let config: Option<String> = self
            .connection
            .query_row(SELECT_SETTINGS_SQL, params![user_id], |row| row.get(0))
            .optional()
            .db_context("Failed to query settings")?;

        // Unknown or missing keys fall back to their defaults.
        Ok(config
            .map(|json| serde_json::from_str::<Settings>(&json))
            .transpose()?)
    }

    fn update_settings(&mut self, user_id: &str, settings: &Settings) -> Result<()> {
        let config = serde_json::to_string(settings)?;
        self.connection
            .execute(
                UPSERT_SETTINGS_SQL,
                params![user_id, config, Timestamp::now().to_string()],
            )
            .db_context("Failed to save settings")?;
        Ok(())
    }
}
