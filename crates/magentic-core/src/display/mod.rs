//! Markdown formatting for plans, sessions and settings.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and operation outcomes get newtype wrappers so the same data
//! can be shown differently in lists, after a create, or after a delete. The
//! CLI renders the markdown to the terminal.
//!
//! ```rust
//! use magentic_core::{display::CreateResult, models::Plan};
//!
//! let plan = Plan {
//!     id: Some(1),
//!     task: "Plan a trip".to_string(),
//!     steps: vec![],
//!     user_id: "local".to_string(),
//!     session_id: None,
//! };
//!
//! let output = CreateResult::new(plan).to_string();
//! assert!(output.contains("Created plan with ID: 1"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Plans, Sessions};
pub use datetime::{CreatedAt, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
