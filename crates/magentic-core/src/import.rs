//! Validation of user-supplied plan files.

use std::path::Path;

use serde_json::Value;

use crate::{
    error::ImportError,
    models::{Plan, IMPORTED_PLAN_TASK},
    normalize::normalize_plan,
};

/// MIME type accepted for plan imports.
pub const JSON_MIME: &str = "application/json";

/// Checks that a selected or dropped file is a JSON file, by MIME type or by
/// `.json` extension.
pub fn ensure_json_file(name: &str, mime: Option<&str>) -> Result<(), ImportError> {
    let mime_ok = mime.is_some_and(|m| m.trim().eq_ignore_ascii_case(JSON_MIME));
    let ext_ok = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if mime_ok || ext_ok {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFileType {
            name: name.to_string(),
        })
    }
}

/// Parses and validates the text of an imported plan file.
///
/// The document must be a JSON object. Beyond that nothing is required: the
/// object is normalized with a fresh identity and [`IMPORTED_PLAN_TASK`] as
/// the fallback task, so an import without `steps` yields an empty plan.
pub fn validate_import(text: &str, user_id: &str) -> Result<Plan, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| ImportError::MalformedDocument { source })?;

    if !value.is_object() {
        return Err(ImportError::InvalidShape);
    }

    Ok(normalize_plan(&value, user_id, IMPORTED_PLAN_TASK, false))
}
