//! Settings operations.
//!
//! Every change loads the stored settings, applies the change to a copy and
//! writes the copy back, so a rejected change leaves the stored settings as
//! they were.

use log::{info, warn};

use crate::{
    api::SettingsApi,
    error::{CoreError, Result},
    model_config::{check_model_config, ModelPreset},
    models::Settings,
};

/// Stored settings for the user, or the defaults if none were saved.
pub fn load_settings<A: SettingsApi + ?Sized>(api: &A, user_id: &str) -> Result<Settings> {
    Ok(api.get_settings(user_id)?.unwrap_or_default())
}

/// Replaces the user's settings. The model configuration must pass
/// [`check_model_config`].
pub fn save_settings<A: SettingsApi + ?Sized>(
    api: &mut A,
    user_id: &str,
    settings: &Settings,
) -> Result<()> {
    check_model_config(&settings.model_configs)?;
    api.update_settings(user_id, settings)
}

fn modify<A, F>(api: &mut A, user_id: &str, change: F) -> Result<Settings>
where
    A: SettingsApi + ?Sized,
    F: FnOnce(&mut Settings) -> Result<()>,
{
    let mut settings = load_settings(api, user_id)?;
    change(&mut settings)?;
    api.update_settings(user_id, &settings)?;
    Ok(settings)
}

/// Restores the default settings.
pub fn reset_settings<A: SettingsApi + ?Sized>(api: &mut A, user_id: &str) -> Result<Settings> {
    let settings = Settings::default();
    api.update_settings(user_id, &settings)?;
    info!("Reset settings for {user_id}");
    Ok(settings)
}

/// Replaces the model configuration with user-supplied YAML text. Text missing
/// any required client section is rejected outright.
pub fn import_model_config<A: SettingsApi + ?Sized>(
    api: &mut A,
    user_id: &str,
    text: &str,
) -> Result<Settings> {
    if let Err(e) = check_model_config(text) {
        warn!("Rejected model configuration for {user_id}: {e}");
        return Err(e);
    }
    modify(api, user_id, |settings| {
        settings.model_configs = text.to_string();
        Ok(())
    })
}

/// Replaces the model configuration with a preset, chosen by name.
pub fn apply_model_preset<A: SettingsApi + ?Sized>(
    api: &mut A,
    user_id: &str,
    name: &str,
) -> Result<(ModelPreset, Settings)> {
    if name.trim().is_empty() {
        return Err(CoreError::invalid_input("model", "model name cannot be empty"));
    }
    let preset = ModelPreset::from_name(name);
    let settings = modify(api, user_id, |settings| {
        settings.model_configs = preset.yaml();
        Ok(())
    })?;
    info!("Applied {} configuration for {user_id}", preset.label());
    Ok((preset, settings))
}

pub fn allow_website<A: SettingsApi + ?Sized>(
    api: &mut A,
    user_id: &str,
    site: &str,
) -> Result<Settings> {
    modify(api, user_id, |settings| {
        if settings.allow_website(site) {
            Ok(())
        } else {
            Err(CoreError::invalid_input(
                "website",
                format!("'{}' is blank or already allowed", site.trim()),
            ))
        }
    })
}

pub fn remove_website<A: SettingsApi + ?Sized>(
    api: &mut A,
    user_id: &str,
    site: &str,
) -> Result<Settings> {
    modify(api, user_id, |settings| {
        if settings.remove_website(site) {
            Ok(())
        } else {
            Err(CoreError::invalid_input(
                "website",
                format!("'{}' is not in the allow list", site.trim()),
            ))
        }
    })
}
