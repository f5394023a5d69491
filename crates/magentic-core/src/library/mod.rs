//! Plan library, session and settings operations.
//!
//! Each operation is a synchronous function over the collaborator traits in
//! [`crate::api`]. They combine the pure engines (normalization, import
//! validation, search, grouping, model-config checks) with the backend calls
//! the UI makes, and they follow one rule: rejected input never reaches the
//! backend, and a failed backend call never yields a partially updated value.
//!
//! [`crate::Workspace`] runs these functions against SQLite on a blocking
//! thread.

pub mod plans;
pub mod sessions;
pub mod settings;


pub use plans::{
    create_blank_plan, delete_plan, export_plan, fetch_plans, get_plan, import_plan, is_learned,
    learn_plan, search_plans, update_plan, use_plan, ImportFile,
};
pub use sessions::{create_session, delete_session, list_sessions, rename_session, sidebar};
pub use settings::{
    allow_website, apply_model_preset, import_model_config, load_settings, remove_website,
    reset_settings, save_settings,
};
