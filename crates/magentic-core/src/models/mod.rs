//! Data models for plans, sessions and settings.
//!
//! Display implementations live in [`crate::display::models`]; this module
//! only holds the data and the small invariants that travel with it.

pub mod plan;
pub mod session;
pub mod settings;


pub use plan::{Plan, PlanStep, IMPORTED_PLAN_TASK, NEW_PLAN_TASK, UNTITLED_STEP, UNTITLED_TASK};
pub use session::{NewSession, Session, SessionGroups, SessionSidebar};
pub use settings::{ApprovalPolicy, RetrievePlans, Settings, DEFAULT_MODEL};
