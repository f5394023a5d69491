use magentic_core::{Workspace, WorkspaceBuilder};
use tempfile::TempDir;

pub const USER: &str = "integration";

/// Helper function to create a test workspace
pub async fn create_test_workspace() -> (TempDir, Workspace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workspace = WorkspaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workspace");
    (temp_dir, workspace)
}
