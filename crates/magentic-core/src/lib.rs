//! Core library for Magentic: the plan library, the session sidebar and
//! per-user settings.
//!
//! The crate is layered:
//!
//! - Pure engines that never touch storage: [`normalize`] (loosely shaped plan
//!   records to [`Plan`]), [`import`] (plan file validation), [`filters`]
//!   (plan search), [`grouping`] (session ordering and recency buckets) and
//!   [`model_config`] (model client configuration checks and presets).
//! - Collaborator traits in [`api`], implemented on SQLite by [`Database`].
//! - Synchronous operations in [`library`] that combine the two.
//! - [`Workspace`], an async facade that runs those operations on a blocking
//!   thread.
//!
//! Domain types implement [`std::fmt::Display`] as markdown; see [`display`].
//!
//! # Quick Start
//!
//! ```rust
//! use magentic_core::WorkspaceBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = WorkspaceBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let plan = workspace
//!     .import_plan("trip.json", None, r#"{"task": "Plan a trip"}"#, "local")
//!     .await?;
//! println!("{plan}");
//!
//! let sidebar = workspace.sidebar("local").await?;
//! println!("{sidebar}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod db;
pub mod display;
pub mod error;
pub mod filters;
pub mod grouping;
pub mod import;
pub mod library;
pub mod model_config;
pub mod models;
pub mod normalize;
pub mod workspace;

// Re-export commonly used types
pub use api::{LearnedPlanStore, PlanApi, SessionApi, SettingsApi};
pub use db::Database;
pub use display::{CreateResult, DeleteResult, OperationStatus, Plans, Sessions, UpdateResult};
pub use error::{CoreError, ImportError, Result};
pub use filters::{filter_plans, PlanFilter};
pub use grouping::{build_sidebar, group_sessions, sort_sessions_desc};
pub use import::validate_import;
pub use model_config::{validate_model_config, ModelPreset};
pub use models::{
    ApprovalPolicy, NewSession, Plan, PlanStep, RetrievePlans, Session, SessionGroups,
    SessionSidebar, Settings,
};
pub use normalize::normalize_plan;
pub use workspace::{Workspace, WorkspaceBuilder};
