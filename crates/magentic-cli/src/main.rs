//! Magentic CLI
//!
//! Command-line front end for the plan library, the session sidebar and
//! per-user settings.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use magentic_core::WorkspaceBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        command,
    } = Args::parse();

    let workspace = WorkspaceBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to open workspace")?;

    info!("Using {} as {user}", workspace.database_path().display());

    let cli = Cli::new(workspace, TerminalRenderer::new(!no_color), user);

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Session { command }) => cli.handle_session_command(command).await,
        Some(Settings { command }) => cli.handle_settings_command(command).await,
        None => cli.show_sidebar().await,
    }
}
