//! Plan and step model definitions.

use serde::{Deserialize, Serialize};

/// Task label used when a listed plan arrives without one.
pub const UNTITLED_TASK: &str = "Untitled";

/// Task label for a freshly created blank plan.
pub const NEW_PLAN_TASK: &str = "New Plan";

/// Task label for an imported plan that carries no task.
pub const IMPORTED_PLAN_TASK: &str = "Imported Plan";

/// Title given to steps that arrive without one.
pub const UNTITLED_STEP: &str = "Untitled Step";

/// A reusable plan: a task description and the ordered steps to carry it out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Identifier assigned by the backend. Absent on plans that have not been
    /// stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// What the plan accomplishes. Never empty.
    pub task: String,

    /// Ordered steps.
    #[serde(default)]
    pub steps: Vec<PlanStep>,

    /// Owner of the plan
    pub user_id: String,

    /// Session the plan was learned from, if any
    #[serde(default)]
    pub session_id: Option<i64>,
}

impl Plan {
    /// Number of steps that will run when the plan is replayed.
    pub fn enabled_steps(&self) -> usize {
        self.steps.iter().filter(|step| step.enabled).count()
    }

    /// Copy of the plan without its identifier, suitable for export or for
    /// creating a new plan from an existing one.
    pub fn without_id(&self) -> Plan {
        Plan {
            id: None,
            ..self.clone()
        }
    }
}

/// A single step within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanStep {
    pub title: String,

    #[serde(default)]
    pub details: String,

    /// Disabled steps are kept in the plan but skipped on replay
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Whether the step is expanded in the editor
    #[serde(default)]
    pub open: bool,

    /// Agent assigned to carry out the step; empty lets the orchestrator pick
    #[serde(default)]
    pub agent_name: String,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for PlanStep {
    fn default() -> Self {
        Self {
            title: UNTITLED_STEP.to_string(),
            details: String::new(),
            enabled: true,
            open: false,
            agent_name: String::new(),
        }
    }
}
