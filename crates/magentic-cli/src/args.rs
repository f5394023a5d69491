use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, SessionCommands, SettingsCommands};

/// Command-line front end for Magentic plans, sessions and settings
///
/// Keeps a library of reusable plans, starts sessions from them, shows the
/// session sidebar grouped by recency, and manages per-user settings such as
/// the model client configuration and the website allow list.
#[derive(Parser)]
#[command(version, about, name = "mui")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/magentic/magentic.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User whose plans, sessions and settings are used
    #[arg(long, global = true, env = "MAGENTIC_USER", default_value = "local")]
    pub user: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, the session sidebar is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the plan library
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage sessions
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Show and change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}
