//! Normalization of loosely shaped plan records.
//!
//! Plans reach the library from two places: backend responses and
//! user-supplied import files. Both go through [`normalize_plan`], which never
//! fails. Missing or wrongly typed fields are replaced by defaults instead of
//! being reported.
//!
//! Field presence follows JSON "truthiness": `null`, `false`, `0`, `""` and a
//! missing key all count as absent.

use serde_json::Value;

use crate::models::{Plan, PlanStep, UNTITLED_STEP};

/// Builds a canonical [`Plan`] from an arbitrary JSON value.
///
/// * `id` is kept only when `preserve_id` is set and the raw id is a non-zero
///   integer (or a string holding one). Plans about to be created never carry
///   a stale id.
/// * `task` falls back to `default_task`.
/// * `steps` is empty unless the raw value is an array.
/// * `user_id` falls back to `user_id`, `session_id` to `None`.
pub fn normalize_plan(raw: &Value, user_id: &str, default_task: &str, preserve_id: bool) -> Plan {
    let id = if preserve_id {
        raw.get("id").and_then(as_id)
    } else {
        None
    };

    let task = raw
        .get("task")
        .and_then(as_text)
        .unwrap_or_else(|| default_task.to_string());

    let steps = match raw.get("steps") {
        Some(Value::Array(items)) => items.iter().map(normalize_step).collect(),
        _ => Vec::new(),
    };

    let user_id = raw
        .get("user_id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(user_id)
        .to_string();

    let session_id = raw.get("session_id").and_then(as_id);

    Plan {
        id,
        task,
        steps,
        user_id,
        session_id,
    }
}

/// Builds a [`PlanStep`] from an arbitrary JSON value. Non-object values yield
/// a default step.
pub fn normalize_step(raw: &Value) -> PlanStep {
    let text = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    PlanStep {
        title: text("title").unwrap_or_else(|| UNTITLED_STEP.to_string()),
        details: text("details").unwrap_or_default(),
        // Only an explicit `false` disables a step.
        enabled: raw.get("enabled") != Some(&Value::Bool(false)),
        open: raw.get("open").is_some_and(is_truthy),
        agent_name: text("agent_name").unwrap_or_default(),
    }
}

/// JSON truthiness: everything except `null`, `false`, zero and `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A truthy scalar rendered as text. Strings are used verbatim, numbers and
/// `true` are formatted; composites are not text.
fn as_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(_) => Some("true".to_string()),
        _ => None,
    }
}

/// A truthy integer identifier, also accepted in string form.
fn as_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}
