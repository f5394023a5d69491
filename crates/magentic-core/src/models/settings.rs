//! Per-user settings model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model_config::generate_openai_model_config;

/// Model used for the default model configuration.
pub const DEFAULT_MODEL: &str = "gpt-4.1-2025-04-14";

/// When the agents must ask before acting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalPolicy {
    /// Never ask for approval
    Never,
    /// Let the action guard decide
    #[default]
    AutoConservative,
    /// Always ask for approval
    Always,
}

impl ApprovalPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalPolicy::Never => "never",
            ApprovalPolicy::AutoConservative => "auto-conservative",
            ApprovalPolicy::Always => "always",
        }
    }
}

impl FromStr for ApprovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" => Ok(ApprovalPolicy::Never),
            "auto-conservative" | "auto_conservative" => Ok(ApprovalPolicy::AutoConservative),
            "always" => Ok(ApprovalPolicy::Always),
            _ => Err(format!("Invalid approval policy: {s}")),
        }
    }
}

impl fmt::Display for ApprovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How saved plans are used when a new task starts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetrievePlans {
    /// Do not look up saved plans
    #[default]
    Never,
    /// Offer the most relevant saved plan as a hint for the new plan
    Hint,
    /// Reuse the most relevant saved plan directly
    Reuse,
}

impl RetrievePlans {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievePlans::Never => "never",
            RetrievePlans::Hint => "hint",
            RetrievePlans::Reuse => "reuse",
        }
    }
}

impl FromStr for RetrievePlans {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" => Ok(RetrievePlans::Never),
            "hint" => Ok(RetrievePlans::Hint),
            "reuse" => Ok(RetrievePlans::Reuse),
            _ => Err(format!("Invalid plan retrieval mode: {s}")),
        }
    }
}

impl fmt::Display for RetrievePlans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings stored for each user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub approval_policy: ApprovalPolicy,
    pub allow_for_replans: bool,
    pub do_bing_search: bool,
    pub retrieve_relevant_plans: RetrievePlans,
    /// Model client configuration as YAML text
    pub model_configs: String,
    /// Websites the agents may visit; empty means unrestricted
    pub allowed_websites: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            approval_policy: ApprovalPolicy::default(),
            allow_for_replans: true,
            do_bing_search: false,
            retrieve_relevant_plans: RetrievePlans::default(),
            model_configs: generate_openai_model_config(DEFAULT_MODEL),
            allowed_websites: Vec::new(),
        }
    }
}

impl Settings {
    /// Adds a website to the allow list.
    ///
    /// Returns `false` when the entry is blank or already present.
    pub fn allow_website(&mut self, site: &str) -> bool {
        let site = site.trim();
        if site.is_empty() || self.allowed_websites.iter().any(|s| s == site) {
            return false;
        }
        self.allowed_websites.push(site.to_string());
        true
    }

    /// Removes a website from the allow list. Returns `false` if it was not
    /// listed.
    pub fn remove_website(&mut self, site: &str) -> bool {
        let before = self.allowed_websites.len();
        self.allowed_websites.retain(|s| s != site.trim());
        self.allowed_websites.len() != before
    }

    /// Whether browsing is restricted to the allow list.
    pub fn restricts_websites(&self) -> bool {
        !self.allowed_websites.is_empty()
    }
}
