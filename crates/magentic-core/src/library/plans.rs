//! Plan library operations.

use log::{debug, info};
use serde_json::Value;

use crate::{
    api::{LearnedPlanStore, PlanApi, SessionApi},
    error::{CoreError, Result},
    filters::filter_plans,
    import::{ensure_json_file, validate_import},
    models::{NewSession, Plan, Session, NEW_PLAN_TASK, UNTITLED_TASK},
    normalize::normalize_plan,
};

/// A plan file picked or dropped by the user.
#[derive(Debug, Clone, Copy)]
pub struct ImportFile<'a> {
    pub name: &'a str,
    pub mime: Option<&'a str>,
    pub contents: &'a str,
}

/// Lists the user's plans, normalized with their ids kept.
pub fn fetch_plans<A: PlanApi + ?Sized>(api: &A, user_id: &str) -> Result<Vec<Plan>> {
    let raw = api.list_plans(user_id)?;
    Ok(raw
        .iter()
        .map(|plan| normalize_plan(plan, user_id, UNTITLED_TASK, true))
        .collect())
}

/// Lists the user's plans whose task contains `term`, ignoring case.
pub fn search_plans<A: PlanApi + ?Sized>(
    api: &A,
    user_id: &str,
    term: &str,
) -> Result<Vec<Plan>> {
    let plans = fetch_plans(api, user_id)?;
    Ok(filter_plans(&plans, term))
}

/// Loads one of the user's plans, normalized with its id kept. Plans owned by
/// someone else are reported as not found.
pub fn get_plan<A: PlanApi + ?Sized>(api: &A, id: i64, user_id: &str) -> Result<Plan> {
    let raw = api
        .get_plan(id, user_id)?
        .ok_or(CoreError::PlanNotFound { id })?;
    let mut plan = normalize_plan(&raw, user_id, UNTITLED_TASK, true);
    plan.id.get_or_insert(id);
    Ok(plan)
}

/// Creates an empty plan with the default task label.
pub fn create_blank_plan<A: PlanApi + ?Sized>(api: &mut A, user_id: &str) -> Result<Plan> {
    let blank = normalize_plan(
        &serde_json::json!({ "task": NEW_PLAN_TASK, "steps": [] }),
        user_id,
        UNTITLED_TASK,
        false,
    );
    let plan = api.create_plan(&blank, user_id)?;
    info!("Created plan {:?} for {user_id}", plan.id);
    Ok(plan)
}

/// Validates an imported file and stores it as a new plan.
///
/// Files that are not JSON, do not parse, or do not hold a JSON object are
/// rejected before the backend is called.
pub fn import_plan<A: PlanApi + ?Sized>(
    api: &mut A,
    file: ImportFile<'_>,
    user_id: &str,
) -> Result<Plan> {
    let plan = ensure_json_file(file.name, file.mime)
        .and_then(|()| validate_import(file.contents, user_id))
        .map_err(|e| {
            debug!("Rejected import of {}: {e}", file.name);
            e
        })?;

    let created = api.create_plan(&plan, user_id)?;
    info!("Imported plan {:?} from {}", created.id, file.name);
    Ok(created)
}

/// Saves an edited plan.
///
/// The edited record is normalized like a backend response, with `id` taking
/// precedence over any id inside the record.
pub fn update_plan<A: PlanApi + ?Sized>(
    api: &mut A,
    id: i64,
    raw: &Value,
    user_id: &str,
) -> Result<Plan> {
    if api.get_plan(id, user_id)?.is_none() {
        return Err(CoreError::PlanNotFound { id });
    }

    let mut plan = normalize_plan(raw, user_id, UNTITLED_TASK, false);
    plan.id = Some(id);
    api.update_plan(&plan, user_id)
}

pub fn delete_plan<A: PlanApi + ?Sized>(api: &mut A, id: i64, user_id: &str) -> Result<()> {
    if api.get_plan(id, user_id)?.is_none() {
        return Err(CoreError::PlanNotFound { id });
    }
    api.delete_plan(id, user_id)?;
    info!("Deleted plan {id}");
    Ok(())
}

/// Serializes a plan for sharing. The id is left out so the file imports as a
/// new plan.
pub fn export_plan<A: PlanApi + ?Sized>(api: &A, id: i64, user_id: &str) -> Result<String> {
    let plan = get_plan(api, id, user_id)?;
    Ok(serde_json::to_string_pretty(&plan.without_id())?)
}

/// Starts a new session from a saved plan. The session is named after the
/// plan's task.
pub fn use_plan<A>(api: &mut A, id: i64, user_id: &str) -> Result<(Session, Plan)>
where
    A: PlanApi + SessionApi + ?Sized,
{
    let plan = get_plan(api, id, user_id)?;
    let session = api.create_session(
        &NewSession {
            name: format!("Plan: {}", plan.task),
            team_id: None,
        },
        user_id,
    )?;
    info!("Session {} started from plan {id}", session.id);
    Ok((session, plan))
}

/// Whether a plan was already learned from this conversation message.
pub fn is_learned<A: LearnedPlanStore + ?Sized>(
    api: &A,
    session_id: i64,
    message_id: i64,
) -> Result<bool> {
    api.is_learned(session_id, message_id)
}

/// Saves the plan produced by a conversation into the library, once per
/// `(session_id, message_id)`.
///
/// The plan is linked to the session it came from. The plan and its marker are
/// stored together: a failed save leaves neither behind and can be retried.
pub fn learn_plan<A>(
    api: &mut A,
    session_id: i64,
    message_id: i64,
    raw: &Value,
    user_id: &str,
) -> Result<Plan>
where
    A: LearnedPlanStore + ?Sized,
{
    if session_id <= 0 {
        return Err(CoreError::invalid_input("session_id", "missing session information"));
    }
    if user_id.trim().is_empty() {
        return Err(CoreError::invalid_input("user_id", "missing user information"));
    }

    let mut plan = normalize_plan(raw, user_id, UNTITLED_TASK, false);
    plan.session_id = Some(session_id);

    let created = api
        .store_learned_plan(session_id, message_id, &plan, user_id)
        .map_err(|e| {
            if let CoreError::AlreadyLearned { .. } = e {
                debug!("Plan for {session_id}-{message_id} already learned");
            }
            e
        })?;
    info!("Learned plan {:?} from session {session_id}", created.id);
    Ok(created)
}
