//! Search filtering for plan lists.

use crate::models::Plan;

/// Case-insensitive substring filter on a plan's task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    term: String,
}

impl PlanFilter {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_lowercase(),
        }
    }

    /// An empty term matches every plan.
    pub fn matches(&self, plan: &Plan) -> bool {
        self.term.is_empty() || plan.task.to_lowercase().contains(&self.term)
    }
}

/// Returns the plans whose task contains `term`, ignoring case, in their
/// original order.
pub fn filter_plans(plans: &[Plan], term: &str) -> Vec<Plan> {
    let filter = PlanFilter::new(term);
    plans.iter().filter(|plan| filter.matches(plan)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(task: &str) -> Plan {
        Plan {
            id: None,
            task: task.to_string(),
            steps: vec![],
            user_id: "u1".to_string(),
            session_id: None,
        }
    }

    #[test]
    fn test_empty_term_is_identity() {
        let plans = vec![plan("b"), plan("a"), plan("c")];
        assert_eq!(filter_plans(&plans, ""), plans);
    }

    #[test]
    fn test_match_ignores_case() {
        let plans = vec![plan("Book flight"), plan("BOOK hotel"), plan("Order pizza")];
        let found = filter_plans(&plans, "book");
        assert_eq!(found, vec![plan("Book flight"), plan("BOOK hotel")]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let plans = vec![plan("Book flight")];
        assert!(filter_plans(&plans, "train").is_empty());
    }

    #[test]
    fn test_non_ascii_terms() {
        let plans = vec![plan("Überprüfe Rechnungen"), plan("Pay bills")];
        assert_eq!(filter_plans(&plans, "ÜBER"), vec![plan("Überprüfe Rechnungen")]);
    }
}
