//! Command definitions and their handlers.
//!
//! Argument structures carry only what clap needs. [`Cli`] turns them into
//! [`Workspace`] calls and renders the results as markdown.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use magentic_core::{
    display::{CreateResult, DeleteResult, OperationStatus, Plans, Sessions, UpdateResult},
    ApprovalPolicy, RetrievePlans, Workspace,
};
use serde_json::Value;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Plan commands
// ============================================================================

/// List saved plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Only show plans whose task contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

/// A plan selected by id
#[derive(Args)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: i64,
}

/// Import a plan from a JSON file
#[derive(Args)]
pub struct ImportPlanArgs {
    /// Path to the plan file; must have a .json extension
    pub file: PathBuf,
}

/// Replace a plan with the contents of a JSON file
#[derive(Args)]
pub struct EditPlanArgs {
    /// ID of the plan to overwrite
    pub id: i64,
    /// JSON file holding the edited plan
    pub file: PathBuf,
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: i64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Export a plan as JSON without its id
#[derive(Args)]
pub struct ExportPlanArgs {
    /// ID of the plan to export
    pub id: i64,
    /// Write to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Identifies the conversation message a plan comes from
#[derive(Args)]
pub struct MessageArgs {
    /// Session the plan was produced in
    #[arg(long)]
    pub session: i64,
    /// Message holding the plan
    #[arg(long)]
    pub message: i64,
}

/// Save the plan of a conversation message into the library
#[derive(Args)]
pub struct LearnPlanArgs {
    #[command(flatten)]
    pub origin: MessageArgs,
    /// JSON file holding the plan produced by the conversation
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List saved plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its steps
    Show(PlanIdArgs),
    /// Create an empty plan
    #[command(alias = "c")]
    Create,
    /// Import a plan from a JSON file
    #[command(alias = "i")]
    Import(ImportPlanArgs),
    /// Replace a plan with the contents of a JSON file
    Edit(EditPlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Export a plan as JSON
    Export(ExportPlanArgs),
    /// Start a new session from a plan
    #[command(alias = "u")]
    Use(PlanIdArgs),
    /// Save the plan of a conversation message into the library
    Learn(LearnPlanArgs),
    /// Check whether a plan was already learned from a message
    Learned(MessageArgs),
}

// ============================================================================
// Session commands
// ============================================================================

/// Create a session
#[derive(Args)]
pub struct CreateSessionArgs {
    /// Name of the session
    pub name: String,
    /// Team the session runs with
    #[arg(long)]
    pub team_id: Option<i64>,
}

/// List sessions
#[derive(Args)]
pub struct ListSessionsArgs {
    /// Show one list, newest first, instead of recency groups
    #[arg(long)]
    pub flat: bool,
}

/// Rename a session
#[derive(Args)]
pub struct RenameSessionArgs {
    /// ID of the session
    pub id: i64,
    /// New name
    pub name: String,
}

/// Delete a session
#[derive(Args)]
pub struct DeleteSessionArgs {
    /// ID of the session to delete
    pub id: i64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Create a session
    #[command(alias = "c")]
    Create(CreateSessionArgs),
    /// List sessions grouped by recency
    #[command(aliases = ["l", "ls"])]
    List(ListSessionsArgs),
    /// Rename a session
    Rename(RenameSessionArgs),
    /// Delete a session
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteSessionArgs),
}

// ============================================================================
// Settings commands
// ============================================================================

/// When the agents must ask before acting
#[derive(Clone, Copy, ValueEnum)]
pub enum ApprovalPolicyArg {
    Never,
    AutoConservative,
    Always,
}

impl From<ApprovalPolicyArg> for ApprovalPolicy {
    fn from(val: ApprovalPolicyArg) -> Self {
        match val {
            ApprovalPolicyArg::Never => ApprovalPolicy::Never,
            ApprovalPolicyArg::AutoConservative => ApprovalPolicy::AutoConservative,
            ApprovalPolicyArg::Always => ApprovalPolicy::Always,
        }
    }
}

/// How saved plans are used for new tasks
#[derive(Clone, Copy, ValueEnum)]
pub enum RetrievePlansArg {
    Never,
    Hint,
    Reuse,
}

impl From<RetrievePlansArg> for RetrievePlans {
    fn from(val: RetrievePlansArg) -> Self {
        match val {
            RetrievePlansArg::Never => RetrievePlans::Never,
            RetrievePlansArg::Hint => RetrievePlans::Hint,
            RetrievePlansArg::Reuse => RetrievePlans::Reuse,
        }
    }
}

/// Change individual settings
#[derive(Args)]
pub struct SetSettingsArgs {
    #[arg(long, value_enum)]
    pub approval_policy: Option<ApprovalPolicyArg>,
    /// Allow the orchestrator to replan
    #[arg(long)]
    pub allow_replans: Option<bool>,
    /// Let agents search with Bing
    #[arg(long)]
    pub bing_search: Option<bool>,
    #[arg(long, value_enum)]
    pub retrieve_plans: Option<RetrievePlansArg>,
}

/// A YAML model configuration file
#[derive(Args)]
pub struct ModelConfigArgs {
    pub file: PathBuf,
}

/// Apply a model configuration preset
#[derive(Args)]
pub struct PresetArgs {
    /// azure-ai-foundry, openrouter, ollama, or an OpenAI model name
    pub name: String,
}

/// A website entry of the allow list
#[derive(Args)]
pub struct WebsiteArgs {
    pub site: String,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,
    /// Change individual settings
    Set(SetSettingsArgs),
    /// Replace the model configuration with a YAML file
    ImportModelConfig(ModelConfigArgs),
    /// Replace the model configuration with a preset
    Preset(PresetArgs),
    /// Restore the default settings
    Reset,
    /// Add a website to the allow list
    AllowSite(WebsiteArgs),
    /// Remove a website from the allow list
    RemoveSite(WebsiteArgs),
}

// ============================================================================
// Handlers
// ============================================================================

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text = read_file(path)?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Runs commands against a workspace for one user.
pub struct Cli {
    workspace: Workspace,
    renderer: TerminalRenderer,
    user: String,
}

impl Cli {
    pub fn new(workspace: Workspace, renderer: TerminalRenderer, user: String) -> Self {
        Self {
            workspace,
            renderer,
            user,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            PlanCommands::List(args) => {
                let plans = match args.search {
                    Some(term) => self.workspace.search_plans(user, &term).await,
                    None => self.workspace.fetch_plans(user).await,
                }
                .context("Failed to list plans")?;
                self.renderer.render(&Plans(plans).to_string())
            }
            PlanCommands::Show(args) => {
                let plan = self
                    .workspace
                    .get_plan(args.id, user)
                    .await
                    .with_context(|| format!("Failed to load plan {}", args.id))?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Create => {
                let plan = self
                    .workspace
                    .create_blank_plan(user)
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Import(args) => {
                let plan = self
                    .workspace
                    .import_plan_file(&args.file, user)
                    .await
                    .context("Failed to import plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Edit(args) => {
                let raw = read_json(&args.file)?;
                let plan = self
                    .workspace
                    .update_plan(args.id, raw, user)
                    .await
                    .with_context(|| format!("Failed to update plan {}", args.id))?;
                self.renderer.render(&UpdateResult::new(plan).to_string())
            }
            PlanCommands::Delete(args) => {
                if !args.confirm {
                    bail!("Plan deletion requires explicit confirmation. Pass --confirm to proceed.");
                }
                self.workspace
                    .delete_plan(args.id, user)
                    .await
                    .with_context(|| format!("Failed to delete plan {}", args.id))?;
                self.renderer
                    .render(&DeleteResult::<magentic_core::Plan>::new(args.id).to_string())
            }
            PlanCommands::Export(args) => {
                let json = self
                    .workspace
                    .export_plan(args.id, user)
                    .await
                    .with_context(|| format!("Failed to export plan {}", args.id))?;
                match args.output {
                    Some(path) => {
                        fs::write(&path, json)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        let status = OperationStatus::success(format!(
                            "Exported plan {} to {}",
                            args.id,
                            path.display()
                        ));
                        self.renderer.render(&status.to_string())
                    }
                    // Raw JSON so the output can be piped into a file.
                    None => {
                        println!("{json}");
                        Ok(())
                    }
                }
            }
            PlanCommands::Use(args) => {
                let (session, plan) = self
                    .workspace
                    .use_plan(args.id, user)
                    .await
                    .with_context(|| format!("Failed to start a session from plan {}", args.id))?;
                self.renderer.render(&CreateResult::new(session).to_string())?;
                self.renderer.render(&format!("\n{plan}"))
            }
            PlanCommands::Learn(args) => {
                let raw = read_json(&args.file)?;
                let plan = self
                    .workspace
                    .learn_plan(args.origin.session, args.origin.message, raw, user)
                    .await
                    .context("Failed to learn plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::Learned(args) => {
                let learned = self
                    .workspace
                    .is_learned(args.session, args.message)
                    .await
                    .context("Failed to check learned plans")?;
                let message = if learned {
                    format!(
                        "A plan was learned from message {} of session {}",
                        args.message, args.session
                    )
                } else {
                    format!(
                        "No plan learned from message {} of session {}",
                        args.message, args.session
                    )
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
        }
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            SessionCommands::Create(args) => {
                let session = self
                    .workspace
                    .create_session(&args.name, args.team_id, user)
                    .await
                    .context("Failed to create session")?;
                self.renderer.render(&CreateResult::new(session).to_string())
            }
            SessionCommands::List(args) => {
                if args.flat {
                    let sidebar = self
                        .workspace
                        .sidebar(user)
                        .await
                        .context("Failed to list sessions")?;
                    self.renderer.render(&Sessions(sidebar.sorted).to_string())
                } else {
                    self.show_sidebar().await
                }
            }
            SessionCommands::Rename(args) => {
                let session = self
                    .workspace
                    .rename_session(args.id, &args.name, user)
                    .await
                    .with_context(|| format!("Failed to rename session {}", args.id))?;
                self.renderer.render(&UpdateResult::new(session).to_string())
            }
            SessionCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Session deletion requires explicit confirmation. Pass --confirm to proceed."
                    );
                }
                self.workspace
                    .delete_session(args.id, user)
                    .await
                    .with_context(|| format!("Failed to delete session {}", args.id))?;
                self.renderer
                    .render(&DeleteResult::<magentic_core::Session>::new(args.id).to_string())
            }
        }
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            SettingsCommands::Show => {
                let settings = self
                    .workspace
                    .settings(user)
                    .await
                    .context("Failed to load settings")?;
                self.renderer.render(&settings.to_string())
            }
            SettingsCommands::Set(args) => {
                let mut changes = Vec::new();
                if let Some(policy) = args.approval_policy {
                    changes.push(format!("Approval policy: {}", ApprovalPolicy::from(policy)));
                }
                if let Some(allow) = args.allow_replans {
                    changes.push(format!("Allow replans: {allow}"));
                }
                if let Some(bing) = args.bing_search {
                    changes.push(format!("Bing search: {bing}"));
                }
                if let Some(mode) = args.retrieve_plans {
                    changes.push(format!("Saved plan retrieval: {}", RetrievePlans::from(mode)));
                }
                if changes.is_empty() {
                    bail!("Nothing to change. See `mui settings set --help`.");
                }

                let settings = self
                    .workspace
                    .update_settings(user, move |settings| {
                        if let Some(policy) = args.approval_policy {
                            settings.approval_policy = policy.into();
                        }
                        if let Some(allow) = args.allow_replans {
                            settings.allow_for_replans = allow;
                        }
                        if let Some(bing) = args.bing_search {
                            settings.do_bing_search = bing;
                        }
                        if let Some(mode) = args.retrieve_plans {
                            settings.retrieve_relevant_plans = mode.into();
                        }
                    })
                    .await
                    .context("Failed to update settings")?;
                self.renderer
                    .render(&UpdateResult::with_changes(settings, changes).to_string())
            }
            SettingsCommands::ImportModelConfig(args) => {
                let text = read_file(&args.file)?;
                let settings = self
                    .workspace
                    .import_model_config(user, &text)
                    .await
                    .context("Failed to import model configuration")?;
                let change = format!("Model configuration loaded from {}", args.file.display());
                self.renderer
                    .render(&UpdateResult::with_changes(settings, vec![change]).to_string())
            }
            SettingsCommands::Preset(args) => {
                let (preset, settings) = self
                    .workspace
                    .apply_model_preset(user, &args.name)
                    .await
                    .context("Failed to apply model preset")?;
                let change = format!("Model configuration set to {preset}");
                self.renderer
                    .render(&UpdateResult::with_changes(settings, vec![change]).to_string())
            }
            SettingsCommands::Reset => {
                let settings = self
                    .workspace
                    .reset_settings(user)
                    .await
                    .context("Failed to reset settings")?;
                let change = "Restored defaults".to_string();
                self.renderer
                    .render(&UpdateResult::with_changes(settings, vec![change]).to_string())
            }
            SettingsCommands::AllowSite(args) => {
                let settings = self
                    .workspace
                    .allow_website(user, &args.site)
                    .await
                    .context("Failed to update the website allow list")?;
                let change = format!("Allowed {}", args.site.trim());
                self.renderer
                    .render(&UpdateResult::with_changes(settings, vec![change]).to_string())
            }
            SettingsCommands::RemoveSite(args) => {
                let settings = self
                    .workspace
                    .remove_website(user, &args.site)
                    .await
                    .context("Failed to update the website allow list")?;
                let change = format!("Removed {}", args.site.trim());
                self.renderer
                    .render(&UpdateResult::with_changes(settings, vec![change]).to_string())
            }
        }
    }

    /// Shows the user's sessions grouped by recency.
    pub async fn show_sidebar(&self) -> Result<()> {
        let sidebar = self
            .workspace
            .sidebar(&self.user)
            .await
            .context("Failed to list sessions")?;
        self.renderer.render(&sidebar.to_string())
    }
}
