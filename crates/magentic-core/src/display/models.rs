//! Display implementations for domain models.
//!
//! Every model renders as markdown. Plans use a heading per plan and a
//! numbered step list; sessions render as a single list item so they can be
//! embedded in the sidebar.

use std::fmt;

use super::datetime::CreatedAt;
use crate::{
    model_config::ModelPreset,
    models::{Plan, PlanStep, Session, Settings},
};

/// Plan id for display. Unsaved plans have none.
pub(crate) struct PlanId(pub Option<i64>);

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "unsaved"),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", PlanId(self.id), self.task)?;
        writeln!(f)?;

        writeln!(
            f,
            "- Steps: {} ({} enabled)",
            self.steps.len(),
            self.enabled_steps()
        )?;
        if let Some(session_id) = self.session_id {
            writeln!(f, "- Learned from session: {session_id}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this plan.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for (index, step) in self.steps.iter().enumerate() {
                write!(f, "{}. ", index + 1)?;
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "**{}**", self.title)?;
        } else {
            write!(f, "~~{}~~ (disabled)", self.title)?;
        }
        if !self.agent_name.is_empty() {
            write!(f, " `{}`", self.agent_name)?;
        }
        writeln!(f)?;

        if !self.details.is_empty() {
            for line in self.details.lines() {
                writeln!(f, "   {line}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (ID: {})", self.name, self.id)?;
        if let Some(team_id) = self.team_id {
            write!(f, ", team {team_id}")?;
        }
        writeln!(f, ", created {}", CreatedAt(self.created_at.as_deref()))
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Settings")?;
        writeln!(f)?;
        writeln!(f, "- Approval policy: {}", self.approval_policy)?;
        writeln!(f, "- Allow replans: {}", yes_no(self.allow_for_replans))?;
        writeln!(f, "- Bing search: {}", yes_no(self.do_bing_search))?;
        writeln!(f, "- Saved plan retrieval: {}", self.retrieve_relevant_plans)?;

        writeln!(f, "\n## Allowed websites")?;
        writeln!(f)?;
        if self.allowed_websites.is_empty() {
            writeln!(f, "Any website may be visited.")?;
        } else {
            for site in &self.allowed_websites {
                writeln!(f, "- {site}")?;
            }
        }

        writeln!(f, "\n## Model configuration")?;
        writeln!(f)?;
        writeln!(f, "```yaml")?;
        writeln!(f, "{}", self.model_configs.trim_end())?;
        writeln!(f, "```")
    }
}

impl fmt::Display for ModelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
