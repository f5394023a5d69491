//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::models::PlanId;
use crate::models::{Plan, Session, SessionGroups, SessionSidebar};

/// A list of plans, shown one short entry per plan.
///
/// ```rust
/// use magentic_core::{display::Plans, models::Plan};
///
/// let plans = Plans(vec![Plan {
///     id: Some(1),
///     task: "Plan a trip".to_string(),
///     steps: vec![],
///     user_id: "local".to_string(),
///     session_id: None,
/// }]);
/// assert!(plans.to_string().contains("## Plan a trip (ID: 1)"));
/// ```
pub struct Plans(pub Vec<Plan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plan> {
        self.0.iter()
    }
}

impl Index<usize> for Plans {
    type Output = Plan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Plans {
    type Item = Plan;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plans {
    type Item = &'a Plan;
    type IntoIter = std::slice::Iter<'a, Plan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            writeln!(f, "## {} (ID: {})", plan.task, PlanId(plan.id))?;
            writeln!(f)?;
            writeln!(
                f,
                "- **Steps**: {} ({} enabled)",
                plan.steps.len(),
                plan.enabled_steps()
            )?;
            if let Some(session_id) = plan.session_id {
                writeln!(f, "- **Learned from session**: {session_id}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A flat list of sessions.
pub struct Sessions(pub Vec<Session>);

impl fmt::Display for Sessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No sessions found.");
        }
        for session in &self.0 {
            write!(f, "{session}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No sessions found.");
        }
        // Empty buckets get no heading.
        let mut first = true;
        for (label, sessions) in self.labelled() {
            if sessions.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "## {label}")?;
            writeln!(f)?;
            for session in sessions {
                write!(f, "{session}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SessionSidebar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.groups)
    }
}
