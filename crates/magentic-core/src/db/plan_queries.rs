//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

use crate::{
    api::PlanApi,
    error::{CoreError, DatabaseResultExt, Result},
    models::{Plan, PlanStep},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (task, user_id, session_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, task, user_id, session_id FROM plans WHERE id = ?1 AND user_id = ?2";
const LIST_PLANS_SQL: &str =
    "SELECT id, task, user_id, session_id FROM plans WHERE user_id = ?1 ORDER BY id";
const UPDATE_PLAN_SQL: &str =
    "UPDATE plans SET task = ?1, session_id = ?2, updated_at = ?3 WHERE id = ?4 AND user_id = ?5";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1 AND user_id = ?2";

const SELECT_STEPS_SQL: &str = "SELECT title, details, is_enabled, is_open, agent_name FROM plan_steps WHERE plan_id = ?1 ORDER BY position";
const INSERT_STEP_SQL: &str = "INSERT INTO plan_steps (plan_id, position, title, details, is_enabled, is_open, agent_name) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const DELETE_STEPS_SQL: &str = "DELETE FROM plan_steps WHERE plan_id = ?1";

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: Some(row.get(0)?),
        task: row.get(1)?,
        steps: Vec::new(),
        user_id: row.get(2)?,
        session_id: row.get(3)?,
    })
}

fn load_steps(connection: &Connection, plan_id: i64) -> Result<Vec<PlanStep>> {
    let mut stmt = connection
        .prepare(SELECT_STEPS_SQL)
        .db_context("Failed to prepare step query")?;

    let steps = stmt
        .query_map(params![plan_id], |row| {
            Ok(PlanStep {
                title: row.get(0)?,
                details: row.get(1)?,
                enabled: row.get(2)?,
                open: row.get(3)?,
                agent_name: row.get(4)?,
            })
        })
        .db_context("Failed to query steps")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch steps")?;

    Ok(steps)
}

fn insert_steps(connection: &Connection, plan_id: i64, steps: &[PlanStep]) -> Result<()> {
    let mut stmt = connection
        .prepare(INSERT_STEP_SQL)
        .db_context("Failed to prepare step insert")?;

    for (position, step) in steps.iter().enumerate() {
        stmt.execute(params![
            plan_id,
            position as i64,
            step.title,
            step.details,
            step.enabled,
            step.open,
            step.agent_name,
        ])
        .db_context("Failed to insert step")?;
    }
    Ok(())
}

/// Inserts a plan and its steps owned by `user_id`. The caller owns the
/// transaction.
pub(super) fn insert_plan(connection: &Connection, plan: &Plan, user_id: &str) -> Result<Plan> {
    let now = Timestamp::now().to_string();
    connection
        .execute(
            INSERT_PLAN_SQL,
            params![plan.task, user_id, plan.session_id, &now, &now],
        )
        .db_context("Failed to insert plan")?;

    let id = connection.last_insert_rowid();
    insert_steps(connection, id, &plan.steps)?;

    Ok(Plan {
        id: Some(id),
        task: plan.task.clone(),
        steps: plan.steps.clone(),
        user_id: user_id.to_string(),
        session_id: plan.session_id,
    })
}

impl super::Database {
    /// Loads a plan owned by `user_id` with its steps.
    pub fn find_plan(&self, id: i64, user_id: &str) -> Result<Option<Plan>> {
        let plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id, user_id], plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        match plan {
            Some(mut plan) => {
                plan.steps = load_steps(&self.connection, id)?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// Loads all plans owned by `user_id` with their steps, oldest first.
    pub fn find_plans(&self, user_id: &str) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let mut plans = stmt
            .query_map(params![user_id], plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        for plan in &mut plans {
            if let Some(id) = plan.id {
                plan.steps = load_steps(&self.connection, id)?;
            }
        }
        Ok(plans)
    }
}

impl PlanApi for super::Database {
    fn list_plans(&self, user_id: &str) -> Result<Vec<Value>> {
        self.find_plans(user_id)?
            .iter()
            .map(|plan| serde_json::to_value(plan).map_err(CoreError::from))
            .collect()
    }

    fn get_plan(&self, id: i64, user_id: &str) -> Result<Option<Value>> {
        self.find_plan(id, user_id)?
            .map(|plan| serde_json::to_value(&plan).map_err(CoreError::from))
            .transpose()
    }

    fn create_plan(&mut self, plan: &Plan, user_id: &str) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let created = insert_plan(&tx, plan, user_id)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(created)
    }

    fn update_plan(&mut self, plan: &Plan, user_id: &str) -> Result<Plan> {
        let id = plan
            .id
            .ok_or_else(|| CoreError::invalid_input("id", "plan has no id to update"))?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let rows = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![plan.task, plan.session_id, &now, id, user_id],
            )
            .db_context("Failed to update plan")?;
        if rows == 0 {
            return Err(CoreError::PlanNotFound { id });
        }

        tx.execute(DELETE_STEPS_SQL, params![id])
            .db_context("Failed to clear plan steps")?;
        insert_steps(&tx, id, &plan.steps)?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.find_plan(id, user_id)?
            .ok_or(CoreError::PlanNotFound { id })
    }

    fn delete_plan(&mut self, id: i64, user_id: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Steps go with the plan through ON DELETE CASCADE.
        let rows = tx
            .execute(DELETE_PLAN_SQL, params![id, user_id])
            .db_context("Failed to delete plan")?;
        if rows == 0 {
            return Err(CoreError::PlanNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
