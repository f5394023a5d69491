//! Learned-plan markers.

use jiff::Timestamp;
use rusqlite::{params, ErrorCode, TransactionBehavior};

use super::plan_queries::insert_plan;
use crate::{
    api::{learned_key, LearnedPlanStore},
    error::{CoreError, DatabaseResultExt, Result},
    models::Plan,
};

const CHECK_LEARNED_SQL: &str = "SELECT EXISTS(SELECT 1 FROM learned_plans WHERE key = ?1)";
const INSERT_LEARNED_SQL: &str = "INSERT INTO learned_plans (key, session_id, message_id, plan_id, created_at) VALUES (?1, ?2, ?3, NULL, ?4)";
const LINK_LEARNED_SQL: &str = "UPDATE learned_plans SET plan_id = ?1 WHERE key = ?2";

fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl LearnedPlanStore for super::Database {
    fn is_learned(&self, session_id: i64, message_id: i64) -> Result<bool> {
        self.connection
            .query_row(
                CHECK_LEARNED_SQL,
                params![learned_key(session_id, message_id)],
                |row| row.get(0),
            )
            .db_context("Failed to check learned plan")
    }

    fn store_learned_plan(
        &mut self,
        session_id: i64,
        message_id: i64,
        plan: &Plan,
        user_id: &str,
    ) -> Result<Plan> {
        let key = learned_key(session_id, message_id);

        // Write lock is held from before the marker insert until commit.
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        match tx.execute(
            INSERT_LEARNED_SQL,
            params![key, session_id, message_id, Timestamp::now().to_string()],
        ) {
            Ok(_) => {}
            Err(e) if is_constraint_violation(&e) => {
                return Err(CoreError::AlreadyLearned {
                    session_id,
                    message_id,
                });
            }
            Err(e) => return Err(e).db_context("Failed to record learned plan"),
        }

        let created = insert_plan(&tx, plan, user_id)?;
        tx.execute(LINK_LEARNED_SQL, params![created.id, key])
            .db_context("Failed to link learned plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(created)
    }
}
